/// LLM Client: the single point of entry for all OpenAI calls in Samvad.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
/// Handlers depend on the `LanguageModel` trait; `LlmClient` is the real backend.
///
/// Model: gpt-4.1-mini (hardcoded; every feature prompt is tuned against it)
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

pub mod prompts;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const RESPONSES_URL: &str = "https://api.openai.com/v1/responses";
/// The model used for all LLM calls in Samvad.
pub const MODEL: &str = "gpt-4.1-mini";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sampling knobs for a Chat Completions call.
#[derive(Debug, Clone, Copy)]
pub struct ChatOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the API to enforce a JSON object response.
    pub json_object: bool,
}

/// Strict JSON-schema output format for the Responses API.
#[derive(Debug, Clone)]
pub struct JsonSchemaFormat {
    pub name: &'static str,
    pub schema: Value,
}

/// A Responses API call grounded in one vector store through `file_search`.
#[derive(Debug, Clone)]
pub struct FileSearchRequest<'a> {
    pub instructions: &'a str,
    pub input: &'a str,
    pub vector_store_id: &'a str,
    pub max_results: Option<u32>,
    pub format: Option<JsonSchemaFormat>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

/// The seam between feature handlers and the model provider.
/// Carried in `AppState` as `Option<Arc<dyn LanguageModel>>` (None when no key is configured).
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// One system + one user message; returns the trimmed text of the first choice.
    async fn chat(&self, system: &str, user: &str, options: ChatOptions)
        -> Result<String, LlmError>;

    /// A Responses API call with file_search; returns the trimmed output text.
    async fn respond(&self, request: FileSearchRequest<'_>) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ChatReply {
    fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Serialize)]
struct ResponsesBody<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
    tools: Vec<FileSearchTool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<TextConfig<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct FileSearchTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    vector_store_ids: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_num_results: Option<u32>,
}

#[derive(Debug, Serialize)]
struct TextConfig<'a> {
    format: SchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct SchemaFormat<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    schema: &'a Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
    usage: Option<ResponsesUsage>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponsesUsage {
    input_tokens: u32,
    output_tokens: u32,
}

impl ResponsesReply {
    /// `output_text` when the API provides it, otherwise the first
    /// `output_text` block of the first `message` item.
    fn text(&self) -> Option<&str> {
        if let Some(text) = self.output_text.as_deref().filter(|t| !t.trim().is_empty()) {
            return Some(text);
        }
        self.output
            .iter()
            .find(|item| item.kind == "message")
            .and_then(|item| item.content.first())
            .filter(|c| c.kind == "output_text")
            .and_then(|c| c.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single OpenAI client used by all features.
/// Every call is a single attempt; callers own their fallback.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, api_key })
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<R, LlmError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("OpenAI API returned {}: {}", status, body);
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn chat(
        &self,
        system: &str,
        user: &str,
        options: ChatOptions,
    ) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: options.json_object.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let reply: ChatReply = self.post(CHAT_COMPLETIONS_URL, &request).await?;

        if let Some(usage) = &reply.usage {
            debug!(
                "chat call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        non_empty(reply.text())
    }

    async fn respond(&self, request: FileSearchRequest<'_>) -> Result<String, LlmError> {
        let body = ResponsesBody {
            model: MODEL,
            instructions: request.instructions,
            input: request.input,
            tools: vec![FileSearchTool {
                kind: "file_search",
                vector_store_ids: [request.vector_store_id],
                max_num_results: request.max_results,
            }],
            text: request.format.as_ref().map(|f| TextConfig {
                format: SchemaFormat {
                    kind: "json_schema",
                    name: f.name,
                    schema: &f.schema,
                    strict: true,
                },
            }),
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
        };

        let reply: ResponsesReply = self.post(RESPONSES_URL, &body).await?;

        if let Some(usage) = &reply.usage {
            debug!(
                "responses call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        non_empty(reply.text())
    }
}

fn non_empty(text: Option<&str>) -> Result<String, LlmError> {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(LlmError::EmptyContent),
    }
}

/// Deserializes model text as JSON, tolerating markdown code fences.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    serde_json::from_str(strip_json_fences(text)).map_err(LlmError::Parse)
}

/// Field deserializer for model output: an explicit `null` becomes the default.
/// Combine with `#[serde(default)]` so missing keys are covered too.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}  ";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_json_reports_parse_errors() {
        let result: Result<Value, _> = parse_json("not json at all");
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[test]
    fn test_null_as_default_accepts_null_and_missing() {
        #[derive(Deserialize)]
        struct Lenient {
            #[serde(default, deserialize_with = "null_as_default")]
            name: String,
            #[serde(default, deserialize_with = "null_as_default")]
            tags: Vec<String>,
        }

        let nulls: Lenient = serde_json::from_value(json!({"name": null, "tags": null})).unwrap();
        assert_eq!(nulls.name, "");
        assert!(nulls.tags.is_empty());

        let missing: Lenient = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.name, "");

        let present: Lenient =
            serde_json::from_value(json!({"name": "x", "tags": ["a"]})).unwrap();
        assert_eq!(present.tags, vec!["a"]);
    }

    #[test]
    fn test_chat_reply_text_from_first_choice() {
        let reply: ChatReply = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"a\":1}"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        }))
        .unwrap();
        assert_eq!(reply.text(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_chat_reply_without_choices_is_empty() {
        let reply: ChatReply = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(matches!(non_empty(reply.text()), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_responses_reply_prefers_output_text() {
        let reply: ResponsesReply = serde_json::from_value(json!({
            "output_text": "{\"x\":1}",
            "output": []
        }))
        .unwrap();
        assert_eq!(reply.text(), Some("{\"x\":1}"));
    }

    #[test]
    fn test_responses_reply_falls_back_to_message_item() {
        let reply: ResponsesReply = serde_json::from_value(json!({
            "output": [
                {"type": "file_search_call", "id": "fs_1"},
                {"type": "message", "content": [{"type": "output_text", "text": "{\"y\":2}"}]}
            ]
        }))
        .unwrap();
        assert_eq!(reply.text(), Some("{\"y\":2}"));
    }

    #[test]
    fn test_responses_reply_ignores_non_text_content() {
        let reply: ResponsesReply = serde_json::from_value(json!({
            "output": [{"type": "message", "content": [{"type": "refusal", "refusal": "no"}]}]
        }))
        .unwrap();
        assert_eq!(reply.text(), None);
    }

    #[test]
    fn test_chat_request_json_object_format() {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![],
            temperature: 0.4,
            max_tokens: 900,
            response_format: Some(ResponseFormat { kind: "json_object" }),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["model"], "gpt-4.1-mini");
    }

    #[test]
    fn test_responses_body_shape() {
        let schema = json!({"type": "object"});
        let body = ResponsesBody {
            model: MODEL,
            instructions: "be kind",
            input: "question",
            tools: vec![FileSearchTool {
                kind: "file_search",
                vector_store_ids: ["vs_123"],
                max_num_results: Some(10),
            }],
            text: Some(TextConfig {
                format: SchemaFormat {
                    kind: "json_schema",
                    name: "guidance",
                    schema: &schema,
                    strict: true,
                },
            }),
            temperature: None,
            max_output_tokens: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["tools"][0]["vector_store_ids"][0], "vs_123");
        assert_eq!(value["text"]["format"]["type"], "json_schema");
        assert_eq!(value["text"]["format"]["strict"], true);
        assert!(value.get("temperature").is_none());
    }
}
