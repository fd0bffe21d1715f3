//! Axum route handlers for the Tartam endpoints.
//!
//! One generic handler serves all three personas; the route picks the
//! `Counsel` implementation.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::models::envelope::elapsed_ms;
use crate::models::request::{language_code, trimmed};
use crate::state::AppState;
use crate::tartam::{seek_guidance, Counsel};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GuidanceRequest {
    pub question: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GuidanceResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub guidance: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub meta: GuidanceMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceMeta {
    pub used_vector_store: bool,
    /// Always present; `null` on success.
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Only for personas that take a category; `null` when none was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    pub elapsed_ms: u64,
}

impl<T: Default + Serialize> GuidanceResponse<T> {
    fn failure(message: &str, language: Option<String>, started: Instant) -> Self {
        Self {
            success: false,
            guidance: T::default(),
            error: Some(message.to_string()),
            meta: GuidanceMeta {
                used_vector_store: false,
                error: Some(message.to_string()),
                language,
                category: None,
                elapsed_ms: elapsed_ms(started),
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/chat-pranami, /api/chat-viraha, /api/chat-pranami-dharma
///
/// Failures after validation still answer 200 with `success: false`; the
/// front-end reads `error` to explain what happened.
pub async fn handle_counsel<C: Counsel>(
    State(state): State<AppState>,
    body: Result<Json<GuidanceRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("{} rejected request body: {rejection}", C::NAME);
            return (
                StatusCode::BAD_REQUEST,
                Json(GuidanceResponse::<C::Guidance>::failure(
                    "Invalid JSON body",
                    None,
                    started,
                )),
            )
                .into_response();
        }
    };

    let question = trimmed(&request.question);
    let language = language_code(&request.language);

    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(GuidanceResponse::<C::Guidance>::failure(
                "Missing 'question' in request body",
                None,
                started,
            )),
        )
            .into_response();
    }

    let category = Some(trimmed(&request.category)).filter(|c| C::USES_CATEGORY && !c.is_empty());

    let result = seek_guidance::<C>(
        state.llm.as_deref(),
        &state.config.tartam_vector_store_id,
        &question,
        &language,
        category.as_deref(),
    )
    .await;

    let response = match result {
        Ok(guidance) => GuidanceResponse {
            success: true,
            guidance,
            error: None,
            meta: GuidanceMeta {
                used_vector_store: true,
                error: None,
                language: Some(language),
                category: C::USES_CATEGORY.then_some(category),
                elapsed_ms: elapsed_ms(started),
            },
        },
        Err(e) => {
            error!("{} backend error: {e}", C::NAME);
            GuidanceResponse::failure(&e.to_string(), Some(language), started)
        }
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tartam::{DharmaGuidance, VerseGuidance};

    #[test]
    fn test_failure_flattens_empty_fields() {
        let response =
            GuidanceResponse::<VerseGuidance>::failure("boom", Some("hi".into()), Instant::now());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["verse_snippet"], "");
        assert_eq!(value["directive"], "");
        assert_eq!(value["error"], "boom");
        assert_eq!(value["meta"]["usedVectorStore"], false);
        assert_eq!(value["meta"]["error"], "boom");
        assert!(value["meta"].get("category").is_none());
    }

    #[test]
    fn test_success_meta_has_null_error_and_category() {
        let response = GuidanceResponse {
            success: true,
            guidance: DharmaGuidance::default(),
            error: None,
            meta: GuidanceMeta {
                used_vector_store: true,
                error: None,
                language: Some("en".into()),
                category: Some(None),
                elapsed_ms: 3,
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("error").is_none());
        assert!(value["meta"]["error"].is_null());
        assert!(value["meta"]["category"].is_null());
        assert!(value["meta"].get("category").is_some());
        assert_eq!(value["dharma_principles"], "");
    }
}
