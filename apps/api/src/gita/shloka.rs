use serde::{Deserialize, Serialize};

use crate::gita::prompts::{shloka_system_prompt, shloka_user_prompt};
use crate::llm_client::{null_as_default, parse_json, ChatOptions, LanguageModel, LlmError};
use crate::models::request::trimmed;

const SHLOKA_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.4,
    max_tokens: 1200,
    json_object: true,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShlokaPayload {
    pub key: Option<String>,
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub sanskrit: Vec<String>,
    pub translit: Option<String>,
    pub meaning: Option<String>,
}

/// The verse to reflect on, trimmed. `None` unless both a reference and
/// at least one Sanskrit line are present.
#[derive(Debug, Clone, PartialEq)]
pub struct Shloka {
    pub key: String,
    pub reference: String,
    pub sanskrit: Vec<String>,
    pub translit: String,
    pub meaning: String,
}

impl Shloka {
    pub fn from_payload(payload: &ShlokaPayload) -> Option<Self> {
        let reference = trimmed(&payload.reference);
        if reference.is_empty() || payload.sanskrit.is_empty() {
            return None;
        }
        Some(Self {
            key: trimmed(&payload.key),
            reference,
            sanskrit: payload.sanskrit.clone(),
            translit: trimmed(&payload.translit),
            meaning: trimmed(&payload.meaning),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShlokaContent {
    #[serde(deserialize_with = "null_as_default")]
    pub plain: String,
    #[serde(deserialize_with = "null_as_default")]
    pub work: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub relationships: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub inner: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub micro: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub reflection: String,
}

pub async fn transform(
    llm: &dyn LanguageModel,
    shloka: &Shloka,
    language: &str,
) -> Result<ShlokaContent, LlmError> {
    let system = shloka_system_prompt();
    let user = shloka_user_prompt(
        &shloka.reference,
        &shloka.key,
        &shloka.sanskrit,
        &shloka.translit,
        &shloka.meaning,
        language,
    );
    let text = llm.chat(&system, &user, SHLOKA_OPTIONS).await?;
    parse_json(&text)
}

/// Served with 200 when no model is configured.
pub fn offline_content() -> ShlokaContent {
    ShlokaContent {
        plain: "The Shloka-to-Life engine is temporarily offline. Please read this verse slowly \
                and reflect on how it invites you to act with more clarity, steadiness and inner trust."
            .to_string(),
        work: vec!["Apply this shloka by doing one small action sincerely at work today, without being overly attached to the result.".to_string()],
        relationships: vec!["Apply this shloka by bringing a little more patience and goodwill into one relationship conversation today.".to_string()],
        inner: vec!["Apply this shloka by observing one recurring thought pattern and gently loosening its hold on you.".to_string()],
        micro: vec!["Take 3 slow breaths, silently recall the verse or its meaning, and offer one worry to the Divine.".to_string()],
        reflection: "In what simple, practical way can I honour the spirit of this verse in the next 24 hours?".to_string(),
    }
}

/// Served with 500 when the model call fails.
pub fn error_content() -> ShlokaContent {
    ShlokaContent {
        plain: "There was an unexpected error in the Shloka-to-Life engine. Please try again in a \
                little while."
            .to_string(),
        reflection: "What does this verse gently invite me to remember about how I am living right now?"
            .to_string(),
        ..ShlokaContent::default()
    }
}
