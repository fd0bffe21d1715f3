use std::time::Instant;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Response envelope shared by the Gita Ashram endpoints.
#[derive(Debug, Serialize)]
pub struct FeatureEnvelope<T> {
    pub feature: Option<String>,
    pub success: bool,
    pub language: String,
    pub content: Option<T>,
    pub meta: FeatureMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureMeta {
    pub model: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<String>,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "_debugSource", skip_serializing_if = "Option::is_none")]
    pub debug_source: Option<&'static str>,
}

impl FeatureMeta {
    pub fn new(model: &'static str, started: Instant) -> Self {
        Self {
            model,
            depth: None,
            elapsed_ms: elapsed_ms(started),
            error: None,
            debug_source: None,
        }
    }

    pub fn with_depth(mut self, depth: impl Into<String>) -> Self {
        self.depth = Some(depth.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_debug_source(mut self, source: &'static str) -> Self {
        self.debug_source = Some(source);
        self
    }
}

/// A plain message in place of structured content.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<T: Serialize> FeatureEnvelope<T> {
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

pub fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
