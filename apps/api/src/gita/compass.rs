//! Decision Compass: theme extraction, verse retrieval, one model call, merged reflection.
//!
//! The model is optional. Without it (or when it fails, or returns something
//! unparseable) the caller still gets a complete, locally built reflection
//! around the retrieved verses.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::gita::corpus::{VerseCorpus, VerseRecord};
use crate::gita::prompts::{compass_system_prompt, compass_user_prompt};
use crate::gita::themes::{extract_themes, ThemeInput};
use crate::llm_client::{null_as_default, parse_json, ChatOptions, LanguageModel, LlmError};
use crate::models::request::{trimmed, trimmed_or};

const COMPASS_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.4,
    max_tokens: 900,
    json_object: false,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / content types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompassPayload {
    pub title: Option<String>,
    pub situation: Option<String>,
    pub life_area: Option<String>,
    pub emotion: Option<String>,
    pub time_horizon: Option<String>,
    pub desired_outcome: Option<String>,
    pub constraints: Option<String>,
}

/// The user's input as we understood it; always ours, never the model's.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputEcho {
    pub title: String,
    pub situation: String,
    pub life_area: String,
    pub emotion: String,
    pub time_horizon: String,
    pub desired_outcome: String,
    pub constraints: String,
}

impl InputEcho {
    pub fn from_payload(payload: &CompassPayload) -> Self {
        Self {
            title: trimmed(&payload.title),
            situation: trimmed(&payload.situation),
            life_area: trimmed_or(&payload.life_area, "general"),
            emotion: trimmed_or(&payload.emotion, "other"),
            time_horizon: trimmed_or(&payload.time_horizon, "unspecified"),
            desired_outcome: trimmed(&payload.desired_outcome),
            constraints: trimmed(&payload.constraints),
        }
    }

    pub fn theme_input(&self) -> ThemeInput {
        ThemeInput {
            life_area: self.life_area.clone(),
            emotion: self.emotion.clone(),
            situation: self.situation.clone(),
            desired_outcome: self.desired_outcome.clone(),
            constraints: self.constraints.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompassVerse {
    #[serde(rename = "ref", deserialize_with = "null_as_default")]
    pub reference: String,
    #[serde(deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(deserialize_with = "null_as_default")]
    pub why_relevant: String,
    #[serde(deserialize_with = "null_as_default")]
    pub devanagari: String,
    #[serde(deserialize_with = "null_as_default")]
    pub transliteration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub en_translation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub hi_translation: String,
}

impl CompassVerse {
    /// Local rendering of a corpus verse. Absent scripture fields stay empty.
    fn from_record(verse: &VerseRecord) -> Self {
        Self {
            reference: verse.reference.clone(),
            excerpt: verse.excerpt().to_string(),
            why_relevant: format!(
                "This verse speaks about {}. Its teaching can help you respond to this situation \
                 with more clarity and steadiness.",
                verse.themes.join(", ")
            ),
            devanagari: verse.devanagari.clone().unwrap_or_default(),
            transliteration: verse.transliteration.clone().unwrap_or_default(),
            en_translation: verse.en_translation.clone().unwrap_or_default(),
            hi_translation: verse.hi_translation.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InnerPractice {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompassContent {
    pub summary: String,
    pub input_echo: InputEcho,
    pub gita_lens: Vec<String>,
    pub verses: Vec<CompassVerse>,
    pub action_plan: Vec<String>,
    pub inner_practice: InnerPractice,
    pub reflection_questions: Vec<String>,
}

/// What the model sends back; every field may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ModelCompass {
    summary: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    gita_lens: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    verses: Vec<CompassVerse>,
    #[serde(deserialize_with = "null_as_default")]
    action_plan: Vec<String>,
    inner_practice: Option<InnerPractice>,
    #[serde(deserialize_with = "null_as_default")]
    reflection_questions: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full Decision Compass for one request. Never fails.
pub async fn run_decision_compass(
    payload: &CompassPayload,
    language: &str,
    depth: &str,
    corpus: &VerseCorpus,
    llm: Option<&dyn LanguageModel>,
) -> CompassContent {
    let echo = InputEcho::from_payload(payload);

    if echo.situation.is_empty() {
        return describe_situation_prompt(echo);
    }

    let themes = extract_themes(&echo.theme_input());
    let verses = corpus.retrieve(&themes);
    debug!(
        "decision compass: {} themes {:?} -> verses {:?}",
        themes.len(),
        themes.iter().collect::<Vec<_>>(),
        verses.iter().map(|v| v.reference.as_str()).collect::<Vec<_>>()
    );
    let fallback = fallback_content(echo.clone(), &verses);

    let Some(llm) = llm else {
        error!("OPENAI_API_KEY is not set for Gita Decision Compass");
        return fallback;
    };

    match ask_model(llm, &echo, language, depth, &verses).await {
        Ok(parsed) => merge(parsed, fallback),
        Err(e) => {
            warn!("Decision Compass model error, serving fallback: {e}");
            fallback
        }
    }
}

async fn ask_model(
    llm: &dyn LanguageModel,
    echo: &InputEcho,
    language: &str,
    depth: &str,
    verses: &[&VerseRecord],
) -> Result<ModelCompass, LlmError> {
    let verses_json = serde_json::to_string_pretty(verses)?;
    let system = compass_system_prompt();
    let user = compass_user_prompt(echo, language, depth, &verses_json);

    let text = llm.chat(&system, &user, COMPASS_OPTIONS).await?;
    parse_json(&text)
}

/// Each field from the model when it is non-empty, otherwise the fallback's.
/// `inputEcho` always comes from the fallback (i.e. from us).
fn merge(parsed: ModelCompass, fallback: CompassContent) -> CompassContent {
    fn list_or(list: Vec<String>, fallback: Vec<String>) -> Vec<String> {
        if list.is_empty() {
            fallback
        } else {
            list
        }
    }

    CompassContent {
        summary: parsed
            .summary
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(fallback.summary),
        input_echo: fallback.input_echo,
        gita_lens: list_or(parsed.gita_lens, fallback.gita_lens),
        verses: if parsed.verses.is_empty() {
            fallback.verses
        } else {
            parsed.verses
        },
        action_plan: list_or(parsed.action_plan, fallback.action_plan),
        inner_practice: parsed.inner_practice.unwrap_or(fallback.inner_practice),
        reflection_questions: list_or(parsed.reflection_questions, fallback.reflection_questions),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn describe_situation_prompt(echo: InputEcho) -> CompassContent {
    CompassContent {
        summary: "Please describe your situation in a few lines so the Gita can reflect with you."
            .to_string(),
        input_echo: echo,
        gita_lens: vec![],
        verses: vec![],
        action_plan: vec![],
        inner_practice: InnerPractice {
            title: "Short pause".to_string(),
            duration: "1–2 minutes".to_string(),
            instructions: "Take a few slow breaths and gently gather your thoughts. When you are \
                           ready, describe your situation and try again."
                .to_string(),
        },
        reflection_questions: vec![],
    }
}

/// A complete reflection built only from local data.
pub fn fallback_content(echo: InputEcho, verses: &[&VerseRecord]) -> CompassContent {
    CompassContent {
        summary: "The Gita invites you to act from dharma and clarity rather than fear or \
                  short-term gain. Choose the option that honours your responsibilities and inner peace."
            .to_string(),
        input_echo: echo,
        gita_lens: strings(&[
            "See this situation as a field (kṣetra) for sincere effort rather than a battlefield of ego and fear.",
            "Focus on the dharmic step in front of you instead of getting lost in imagined future results.",
            "Try to act from steadiness and goodwill, not from panic, guilt, or harsh self-judgment.",
        ]),
        verses: verses.iter().map(|v| CompassVerse::from_record(v)).collect(),
        action_plan: strings(&[
            "Clarify in one or two sentences what truly matters to you here beyond short-term gain or loss.",
            "List your concrete responsibilities in this situation (to yourself, family, work, or others) and see which actions honour them.",
            "Choose one small, dharmic step you can take in the next 24–48 hours and commit to it, offering the result to the Divine.",
        ]),
        inner_practice: InnerPractice {
            title: "2-minute Gita pause".to_string(),
            duration: "2–3 minutes".to_string(),
            instructions: "Sit comfortably and notice your breath. With each exhale, gently release \
                           a little of the tightness around this issue. Mentally repeat a simple line \
                           like 'I will do my duty and offer the fruits.' Then, for a few moments, \
                           imagine placing this situation at the feet of the Divine and asking for \
                           clarity to act rightly."
                .to_string(),
        },
        reflection_questions: strings(&[
            "If I set aside fear and people’s opinions for a moment, what feels truest and most self-respecting here?",
            "Which option best honours my deeper responsibilities and values over the next few years, not just the next few days?",
            "What would it look like to act wholeheartedly and then let go of the result, as the Gita teaches?",
        ]),
    }
}
