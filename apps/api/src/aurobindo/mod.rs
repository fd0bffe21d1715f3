//! Atma Samvad for Sri Aurobindo & The Mother: free-form Q&A and the
//! 21-day journey's daily reading.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::aurobindo::prompts::{
    day_reading_input, day_reading_instructions, qa_system_prompt, DayReadingInput,
};
use crate::llm_client::{
    null_as_default, parse_json, ChatOptions, FileSearchRequest, LanguageModel, LlmError,
};

const QA_OPTIONS: ChatOptions = ChatOptions {
    temperature: 0.4,
    max_tokens: 900,
    json_object: false,
};

const DAY_READING_TEMPERATURE: f32 = 0.3;
const DAY_READING_MAX_TOKENS: u32 = 500;

const DEFAULT_MIN_WORDS: u32 = 60;
const DEFAULT_MAX_WORDS: u32 = 120;
const FLOOR_MIN_WORDS: u32 = 30;
const MIN_WORD_SPREAD: u32 = 10;

const DEFAULT_WORK: &str = "Sri Aurobindo / The Mother";

/// Shown under every Q&A answer.
pub const QA_SOURCES: [&str; 4] = [
    "Sri Aurobindo — The Life Divine",
    "Sri Aurobindo — The Synthesis of Yoga",
    "Sri Aurobindo — Savitri",
    "The Mother — Prayers and Meditations",
];

pub async fn answer_question(
    llm: &dyn LanguageModel,
    question: &str,
    depth: &str,
) -> Result<String, LlmError> {
    let system = qa_system_prompt(depth);
    llm.chat(&system, question, QA_OPTIONS).await
}

/// Word bounds for a reading: `min >= 30`, `max >= min + 10`.
/// Missing, zero or non-numeric inputs fall back to 60 and 120.
pub fn word_bounds(min_words: &Value, max_words: &Value) -> (u32, u32) {
    let min = numeric(min_words)
        .unwrap_or(f64::from(DEFAULT_MIN_WORDS))
        .max(f64::from(FLOOR_MIN_WORDS));
    let max = numeric(max_words)
        .unwrap_or(f64::from(DEFAULT_MAX_WORDS))
        .max(min + f64::from(MIN_WORD_SPREAD));
    // float-to-int casts saturate
    (min as u32, max as u32)
}

/// Non-zero numbers and numeric strings; anything else is `None`.
fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (number.is_finite() && number != 0.0).then_some(number)
}

/// The journey day: a non-zero integer (`3` or `3.0`, not `"3"`).
pub fn journey_day(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    let day = n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })?;
    (day != 0).then_some(day)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Passage {
    pub text: String,
    pub work: String,
    pub section: String,
    /// Not surfaced yet.
    pub source_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PassageReply {
    #[serde(deserialize_with = "null_as_default")]
    text: String,
    #[serde(deserialize_with = "null_as_default")]
    work: String,
    #[serde(deserialize_with = "null_as_default")]
    section: String,
}

impl Passage {
    /// Model output as JSON when it is, otherwise the raw text as the passage.
    fn from_model_text(raw: &str) -> Self {
        let reply = parse_json::<PassageReply>(raw).unwrap_or_else(|e| {
            warn!("day reading was not JSON, using raw text: {e}");
            PassageReply {
                text: raw.to_string(),
                ..PassageReply::default()
            }
        });
        let work = reply.work.trim();
        Self {
            text: reply.text.trim().to_string(),
            work: if work.is_empty() { DEFAULT_WORK } else { work }.to_string(),
            section: reply.section.trim().to_string(),
            source_id: None,
        }
    }
}

pub async fn read_day(
    llm: &dyn LanguageModel,
    vector_store_id: &str,
    input: &DayReadingInput<'_>,
) -> Result<Passage, LlmError> {
    let instructions = day_reading_instructions(input.min_words, input.max_words);
    let description = day_reading_input(input);

    let raw = llm
        .respond(FileSearchRequest {
            instructions: &instructions,
            input: &description,
            vector_store_id,
            max_results: None,
            format: None,
            temperature: Some(DAY_READING_TEMPERATURE),
            max_output_tokens: Some(DAY_READING_MAX_TOKENS),
        })
        .await?;

    Ok(Passage::from_model_text(&raw))
}
