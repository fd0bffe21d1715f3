//! Pranami / Tartam Ashram: Tartam Vidya Compass, Viraha Consoler and
//! Beetak Dharma Solver.
//!
//! All three are strict about their sources: each answer comes from a
//! Responses API call grounded in the Tartam vector store, and there is no
//! generic fallback. A failure is reported to the caller as-is.

pub mod handlers;
pub mod prompts;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm_client::prompts::language_label;
use crate::llm_client::{
    null_as_default, parse_json, FileSearchRequest, JsonSchemaFormat, LanguageModel, LlmError,
};

const MAX_SEARCH_RESULTS: u32 = 10;

#[derive(Debug, Error)]
pub enum GuidanceError {
    #[error("OPENAI_API_KEY is not set on the server.")]
    MissingApiKey,

    #[error("{0}")]
    Upstream(String),

    #[error("Model returned empty output_text.")]
    EmptyOutput,

    #[error("Model output was not valid JSON.")]
    InvalidOutput,
}

impl From<LlmError> for GuidanceError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Api { message, .. } => GuidanceError::Upstream(message),
            LlmError::Http(e) => GuidanceError::Upstream(e.to_string()),
            LlmError::Parse(_) => GuidanceError::InvalidOutput,
            LlmError::EmptyContent => GuidanceError::EmptyOutput,
        }
    }
}

/// Three-field answer of the Compass and the Consoler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerseGuidance {
    #[serde(deserialize_with = "null_as_default")]
    pub verse_snippet: String,
    #[serde(deserialize_with = "null_as_default")]
    pub explanation: String,
    #[serde(deserialize_with = "null_as_default")]
    pub directive: String,
}

/// Three-field answer of the Dharma Solver.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DharmaGuidance {
    #[serde(deserialize_with = "null_as_default")]
    pub dharma_principles: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reasoning: String,
    #[serde(deserialize_with = "null_as_default")]
    pub steps: String,
}

/// One Tartam persona: its prompts, its output shape and the schema name the
/// Responses API enforces.
pub trait Counsel: Send + Sync + 'static {
    type Guidance: Serialize + DeserializeOwned + Default + Send;

    /// Used in logs.
    const NAME: &'static str;
    const SCHEMA_NAME: &'static str;
    const FIELDS: [&'static str; 3];
    /// Whether the request `category` is meaningful (and echoed in `meta`).
    const USES_CATEGORY: bool = false;

    fn instructions(language_code: &str, category: Option<&str>) -> String;
    fn input(question: &str, language_code: &str) -> String;
}

pub struct TartamCompass;
pub struct VirahaConsoler;
pub struct BeetakDharma;

impl Counsel for TartamCompass {
    type Guidance = VerseGuidance;
    const NAME: &'static str = "Tartam Compass";
    const SCHEMA_NAME: &'static str = "tartam_guidance";
    const FIELDS: [&'static str; 3] = ["verse_snippet", "explanation", "directive"];

    fn instructions(language_code: &str, _category: Option<&str>) -> String {
        prompts::compass_instructions(language_code, language_label(language_code))
    }

    fn input(question: &str, language_code: &str) -> String {
        prompts::compass_input(question, language_label(language_code))
    }
}

impl Counsel for VirahaConsoler {
    type Guidance = VerseGuidance;
    const NAME: &'static str = "Viraha";
    const SCHEMA_NAME: &'static str = "viraha_guidance";
    const FIELDS: [&'static str; 3] = ["verse_snippet", "explanation", "directive"];

    fn instructions(language_code: &str, _category: Option<&str>) -> String {
        prompts::viraha_instructions(language_code, language_label(language_code))
    }

    fn input(question: &str, language_code: &str) -> String {
        prompts::viraha_input(question, language_label(language_code))
    }
}

impl Counsel for BeetakDharma {
    type Guidance = DharmaGuidance;
    const NAME: &'static str = "Beetak Dharma";
    const SCHEMA_NAME: &'static str = "beetak_dharma_guidance";
    const FIELDS: [&'static str; 3] = ["dharma_principles", "reasoning", "steps"];
    const USES_CATEGORY: bool = true;

    fn instructions(language_code: &str, category: Option<&str>) -> String {
        prompts::dharma_instructions(language_code, language_label(language_code), category)
    }

    fn input(question: &str, language_code: &str) -> String {
        prompts::dharma_input(question, language_label(language_code))
    }
}

/// Strict schema: an object with exactly the three string fields.
fn output_schema(fields: &[&str]) -> Value {
    let properties: serde_json::Map<String, Value> = fields
        .iter()
        .map(|f| (f.to_string(), json!({ "type": "string" })))
        .collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": fields,
        "additionalProperties": false,
    })
}

/// One file-search call for `C`, parsed into its guidance shape.
pub async fn seek_guidance<C: Counsel>(
    llm: Option<&dyn LanguageModel>,
    vector_store_id: &str,
    question: &str,
    language_code: &str,
    category: Option<&str>,
) -> Result<C::Guidance, GuidanceError> {
    let llm = llm.ok_or(GuidanceError::MissingApiKey)?;

    let instructions = C::instructions(language_code, category);
    let input = C::input(question, language_code);

    let text = llm
        .respond(FileSearchRequest {
            instructions: &instructions,
            input: &input,
            vector_store_id,
            max_results: Some(MAX_SEARCH_RESULTS),
            format: Some(JsonSchemaFormat {
                name: C::SCHEMA_NAME,
                schema: output_schema(&C::FIELDS),
            }),
            temperature: None,
            max_output_tokens: None,
        })
        .await?;

    Ok(parse_json(&text)?)
}
