//! Theme extraction: loosely structured user input -> controlled-vocabulary tags.
//!
//! Three rule tables, evaluated in order: emotion, life area, then a keyword
//! scan over the free-text fields. Keyword matching is plain substring
//! matching ("decidedly" triggers "decide"); that coarseness is intended.

use serde::Serialize;

/// Raw fields a request supplies for extraction.
#[derive(Debug, Clone)]
pub struct ThemeInput {
    pub life_area: String,
    pub emotion: String,
    pub situation: String,
    pub desired_outcome: String,
    pub constraints: String,
}

impl Default for ThemeInput {
    fn default() -> Self {
        Self {
            life_area: "general".to_string(),
            emotion: "other".to_string(),
            situation: String::new(),
            desired_outcome: String::new(),
            constraints: String::new(),
        }
    }
}

/// Deduplicated lowercase tags in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ThemeSet(Vec<String>);

impl ThemeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag after trimming and lowercasing. Returns false for blanks and duplicates.
    pub fn insert(&mut self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() || self.0.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        let tag = tag.trim().to_lowercase();
        self.0.contains(&tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn extend_static(&mut self, tags: &[&str]) {
        for tag in tags {
            self.insert(tag);
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for ThemeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ThemeSet::new();
        for tag in iter {
            set.insert(tag.as_ref());
        }
        set
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rule tables
// ────────────────────────────────────────────────────────────────────────────

/// Emotions the extractor recognises. Anything else contributes no tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emotion {
    Anxious,
    Angry,
    Guilty,
    Sad,
    Confused,
    Hopeful,
}

impl Emotion {
    #[cfg(test)]
    pub const ALL: [Emotion; 6] = [
        Emotion::Anxious,
        Emotion::Angry,
        Emotion::Guilty,
        Emotion::Sad,
        Emotion::Confused,
        Emotion::Hopeful,
    ];

    /// Matches an already-normalised label, including aliases.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "anxious" | "anxiety" | "worried" => Some(Emotion::Anxious),
            "angry" | "frustrated" => Some(Emotion::Angry),
            "guilty" => Some(Emotion::Guilty),
            "sad" | "depressed" => Some(Emotion::Sad),
            "confused" => Some(Emotion::Confused),
            "hopeful" => Some(Emotion::Hopeful),
            _ => None,
        }
    }

    pub fn tags(self) -> &'static [&'static str] {
        match self {
            Emotion::Anxious => &["anxiety", "fear", "overthinking", "trust", "stress"],
            Emotion::Angry => &["anger", "control", "ego"],
            Emotion::Guilty => &["guilt", "duty", "responsibility", "forgiveness"],
            Emotion::Sad => &["sadness", "loss", "hope", "trust"],
            Emotion::Confused => &["confusion", "decision-making", "clarity"],
            Emotion::Hopeful => &["hope", "faith", "trust"],
        }
    }
}

/// Life areas the extractor recognises. "general" and unknown areas contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeArea {
    Career,
    Relationships,
    Family,
    Health,
    Finance,
    Spiritual,
}

impl LifeArea {
    #[cfg(test)]
    pub const ALL: [LifeArea; 6] = [
        LifeArea::Career,
        LifeArea::Relationships,
        LifeArea::Family,
        LifeArea::Health,
        LifeArea::Finance,
        LifeArea::Spiritual,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "career" | "work" => Some(LifeArea::Career),
            "relationships" => Some(LifeArea::Relationships),
            "family" => Some(LifeArea::Family),
            "health" => Some(LifeArea::Health),
            "finance" | "money" => Some(LifeArea::Finance),
            "spiritual" => Some(LifeArea::Spiritual),
            _ => None,
        }
    }

    pub fn tags(self) -> &'static [&'static str] {
        match self {
            LifeArea::Career => &["duty", "work", "purpose", "decision-making"],
            LifeArea::Relationships => &["attachment", "love", "communication", "forgiveness"],
            LifeArea::Family => &["responsibility", "care", "dharma"],
            LifeArea::Health => &["health", "self-care", "discipline"],
            LifeArea::Finance => &["wealth", "security", "non-attachment"],
            LifeArea::Spiritual => &["surrender", "devotion", "knowledge", "self-mastery"],
        }
    }
}

/// A free-text rule: any trigger substring adds all of `tags`.
#[derive(Debug)]
pub struct KeywordRule {
    pub triggers: &'static [&'static str],
    pub tags: &'static [&'static str],
}

impl KeywordRule {
    pub fn matches(&self, text: &str) -> bool {
        self.triggers.iter().any(|t| text.contains(t))
    }
}

pub const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        triggers: &["money", "salary", "income"],
        tags: &["wealth", "security", "non-attachment"],
    },
    KeywordRule {
        triggers: &["health", "disease", "illness"],
        tags: &["health", "self-care", "discipline"],
    },
    KeywordRule {
        triggers: &["choice", "decide", "decision", "confused"],
        tags: &["decision-making", "clarity"],
    },
    KeywordRule {
        triggers: &[
            "wife", "husband", "marriage", "child", "son", "daughter", "parents", "family",
        ],
        tags: &["relationships", "family", "responsibility", "love"],
    },
];

/// Maps one request's input to its theme tags. Pure and total; an empty set is valid output.
pub fn extract_themes(input: &ThemeInput) -> ThemeSet {
    let mut themes = ThemeSet::new();

    if let Some(emotion) = Emotion::from_label(&input.emotion.trim().to_lowercase()) {
        themes.extend_static(emotion.tags());
    }

    if let Some(area) = LifeArea::from_label(&input.life_area.trim().to_lowercase()) {
        themes.extend_static(area.tags());
    }

    let combined = format!(
        "{} {} {}",
        input.situation, input.desired_outcome, input.constraints
    )
    .to_lowercase();

    for rule in KEYWORD_RULES.iter().filter(|r| r.matches(&combined)) {
        themes.extend_static(rule.tags);
    }

    themes
}
