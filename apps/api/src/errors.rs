use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// The `mode`/`guru`/`action` triple of a request nothing could route.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnvelopeEcho {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guru: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The Gita and Tartam endpoints answer failures inside their own envelopes;
/// this type serves the plain `{ "error": ... }` contract of `/api/chat`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server misconfigured: missing OPENAI_API_KEY")]
    Misconfigured,

    #[error("{0}")]
    Upstream(&'static str),

    #[error("Bad request envelope")]
    BadEnvelope(EnvelopeEcho),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        tracing::error!("LLM error: {e}");
        AppError::Upstream("Upstream model error")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Misconfigured => {
                tracing::error!("OPENAI_API_KEY is not set in environment variables");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MISCONFIGURED",
                    self.to_string(),
                )
            }
            AppError::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPSTREAM_ERROR",
                msg.to_string(),
            ),
            AppError::BadEnvelope(_) => (StatusCode::BAD_REQUEST, "BAD_ENVELOPE", self.to_string()),
        };

        let body = match &self {
            AppError::BadEnvelope(got) => json!({ "error": message, "code": code, "got": got }),
            _ => json!({ "error": message, "code": code }),
        };

        (status, Json(body)).into_response()
    }
}
