//! The verse corpus: a small, curated, read-only list of Bhagavad Gita verses.
//!
//! Loaded once at startup (embedded data file, or a path from config) and
//! shared through `AppState` as `Arc<VerseCorpus>`. Nothing mutates it after
//! construction.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Corpus shipped with the binary.
const BUILTIN_CORPUS: &str = include_str!("../../data/gita_verses.json");

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus file: {0}")]
    Io(#[from] std::io::Error),

    #[error("corpus is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("corpus needs at least {min} verses, found {found}")]
    TooSmall { min: usize, found: usize },

    #[error("duplicate verse reference '{0}'")]
    DuplicateRef(String),

    #[error("verse '{0}' has no themes")]
    NoThemes(String),

    #[error("verse '{0}' has no display text (text, summary or shortMeaning)")]
    NoDisplayText(String),
}

/// One immutable corpus entry.
///
/// The source-language fields are either a non-empty string or `None`;
/// blank strings in the data file are normalised to `None` on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseRecord {
    #[serde(rename = "ref")]
    pub reference: String,
    pub chapter: u32,
    pub verse: String,
    pub themes: Vec<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub short_meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devanagari: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transliteration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hi_translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en_translation: Option<String>,
}

impl VerseRecord {
    /// The friendliest available one-liner: shortMeaning, then summary,
    /// then the English translation, then the legacy text.
    pub fn excerpt(&self) -> &str {
        [
            self.short_meaning.as_str(),
            self.summary.as_str(),
            self.en_translation.as_deref().unwrap_or(""),
            self.text.as_str(),
        ]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or("")
    }

    fn has_display_text(&self) -> bool {
        !(self.text.is_empty() && self.summary.is_empty() && self.short_meaning.is_empty())
    }

    fn normalise(&mut self) {
        self.reference = self.reference.trim().to_string();

        let mut seen = HashSet::new();
        self.themes = self
            .themes
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();

        for field in [
            &mut self.devanagari,
            &mut self.transliteration,
            &mut self.hi_translation,
            &mut self.en_translation,
        ] {
            if field.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *field = None;
            }
        }
    }
}

/// The validated, read-only verse corpus.
#[derive(Debug)]
pub struct VerseCorpus {
    verses: Vec<VerseRecord>,
}

impl VerseCorpus {
    /// Retrieval fallbacks hand out up to three entries, so the corpus must hold at least that many.
    pub const MIN_VERSES: usize = 3;

    /// Validates and normalises the records. Declaration order is preserved
    /// because retrieval fallbacks and tie-breaks depend on it.
    pub fn new(mut verses: Vec<VerseRecord>) -> Result<Self, CorpusError> {
        if verses.len() < Self::MIN_VERSES {
            return Err(CorpusError::TooSmall {
                min: Self::MIN_VERSES,
                found: verses.len(),
            });
        }

        let mut refs = HashSet::new();
        for verse in &mut verses {
            verse.normalise();

            if !refs.insert(verse.reference.clone()) {
                return Err(CorpusError::DuplicateRef(verse.reference.clone()));
            }
            if verse.themes.is_empty() {
                return Err(CorpusError::NoThemes(verse.reference.clone()));
            }
            if !verse.has_display_text() {
                return Err(CorpusError::NoDisplayText(verse.reference.clone()));
            }
        }

        Ok(Self { verses })
    }

    pub fn from_json(json: &str) -> Result<Self, CorpusError> {
        let verses: Vec<VerseRecord> = serde_json::from_str(json)?;
        Self::new(verses)
    }

    pub fn from_path(path: &Path) -> Result<Self, CorpusError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The corpus embedded in the binary.
    pub fn builtin() -> Result<Self, CorpusError> {
        Self::from_json(BUILTIN_CORPUS)
    }

    pub fn verses(&self) -> &[VerseRecord] {
        &self.verses
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }
}
