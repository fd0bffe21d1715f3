//! Verse retrieval: score every corpus verse by tag overlap with a theme set
//! and return the best 1-3.
//!
//! Fallbacks (both in corpus declaration order):
//! - no themes at all        -> first 2 verses
//! - themes but zero overlap -> first 3 verses
//!
//! The 2 vs 3 asymmetry is long-standing observable behaviour; keep both
//! constants as they are.

use crate::gita::corpus::{VerseCorpus, VerseRecord};
use crate::gita::themes::ThemeSet;

pub const EMPTY_THEMES_FALLBACK: usize = 2;
pub const NO_MATCH_FALLBACK: usize = 3;
pub const MAX_VERSES: usize = 3;

/// A candidate verse and its overlap count with the request's themes.
#[derive(Debug, Clone, Copy)]
pub struct RankedVerse<'a> {
    pub verse: &'a VerseRecord,
    pub score: usize,
}

/// Number of request themes that also tag the verse (set intersection size).
pub fn overlap_score(themes: &ThemeSet, verse: &VerseRecord) -> usize {
    verse.themes.iter().filter(|t| themes.contains(t)).count()
}

impl VerseCorpus {
    /// Verses with a nonzero score, best first. Equal scores keep corpus order
    /// (`sort_by` is stable).
    pub fn rank(&self, themes: &ThemeSet) -> Vec<RankedVerse<'_>> {
        let mut ranked: Vec<RankedVerse<'_>> = self
            .verses()
            .iter()
            .map(|verse| RankedVerse {
                verse,
                score: overlap_score(themes, verse),
            })
            .filter(|r| r.score > 0)
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// The 1-3 verses most relevant to `themes`. Never empty.
    pub fn retrieve(&self, themes: &ThemeSet) -> Vec<&VerseRecord> {
        if themes.is_empty() {
            return self.head(EMPTY_THEMES_FALLBACK);
        }

        let ranked = self.rank(themes);
        if ranked.is_empty() {
            return self.head(NO_MATCH_FALLBACK);
        }

        ranked
            .into_iter()
            .take(MAX_VERSES)
            .map(|r| r.verse)
            .collect()
    }

    fn head(&self, n: usize) -> Vec<&VerseRecord> {
        self.verses().iter().take(n).collect()
    }
}
