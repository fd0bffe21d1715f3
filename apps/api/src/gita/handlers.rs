//! Axum route handlers for the Gita Ashram endpoints.
//!
//! All three answer with `FeatureEnvelope`, including on bad input, so the
//! front-end only ever parses one shape.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::gita::compass::{run_decision_compass, CompassContent, CompassPayload};
use crate::gita::mind_coach::{self, MindCoachContent, MindCoachPayload};
use crate::gita::shloka::{self, Shloka, ShlokaContent, ShlokaPayload};
use crate::llm_client::null_as_default;
use crate::models::envelope::{FeatureEnvelope, FeatureMeta, Notice};
use crate::models::request::{language_code, trimmed, trimmed_or};
use crate::state::AppState;

const DECISIONS_MODEL: &str = "gita-decisions-v1";
const MIND_COACH_MODEL: &str = "gita-mind-coach-v1";
const SHLOKA_MODEL: &str = "gita-shloka-life-v1";

const MIND_COACH_FEATURE: &str = "mind_coach";
const SHLOKA_FEATURE: &str = "shloka_to_life";

const INVALID_JSON: &str = "Invalid JSON body";
const NOT_IMPLEMENTED_MESSAGE: &str = "This Gita Ashram feature is not implemented yet. Only \
     'decision_compass' returns full structured content right now.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitaRequest {
    pub feature: Option<String>,
    pub language: Option<String>,
    pub depth: Option<String>,
    /// Shape depends on `feature`; decoded once the feature is known.
    pub payload: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MindCoachRequest {
    pub language: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub payload: MindCoachPayload,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShlokaRequest {
    pub language: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub payload: ShlokaPayload,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GitaContent {
    Compass(CompassContent),
    Notice(Notice),
}

fn invalid_json<T: Serialize>(
    feature: Option<&str>,
    model: &'static str,
    started: Instant,
    rejection: &JsonRejection,
) -> Response {
    warn!("rejected request body: {rejection}");
    FeatureEnvelope::<T> {
        feature: feature.map(str::to_string),
        success: false,
        language: "en".to_string(),
        content: None,
        meta: FeatureMeta::new(model, started).with_error(INVALID_JSON),
    }
    .into_response_with(StatusCode::BAD_REQUEST)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/chat-gita
///
/// Feature switch for the Gita Ashram. Only `decision_compass` is backed by
/// real logic; every other feature answers with a notice.
pub async fn handle_chat_gita(
    State(state): State<AppState>,
    body: Result<Json<GitaRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return invalid_json::<GitaContent>(None, DECISIONS_MODEL, started, &rejection)
        }
    };

    let feature = trimmed_or(&request.feature, "qna");
    let language = language_code(&request.language);
    let depth = trimmed_or(&request.depth, "standard");

    let content = match feature.as_str() {
        "decision_compass" => {
            let payload: CompassPayload =
                serde_json::from_value(request.payload).unwrap_or_default();
            GitaContent::Compass(
                run_decision_compass(
                    &payload,
                    &language,
                    &depth,
                    &state.corpus,
                    state.llm.as_deref(),
                )
                .await,
            )
        }
        _ => GitaContent::Notice(Notice::new(NOT_IMPLEMENTED_MESSAGE)),
    };

    FeatureEnvelope {
        feature: Some(feature),
        success: true,
        language,
        content: Some(content),
        meta: FeatureMeta::new(DECISIONS_MODEL, started).with_depth(depth),
    }
    .into_response_with(StatusCode::OK)
}

/// POST /api/chat-gita-mind-coach
pub async fn handle_mind_coach(
    State(state): State<AppState>,
    body: Result<Json<MindCoachRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return invalid_json::<MindCoachContent>(
                Some(MIND_COACH_FEATURE),
                MIND_COACH_MODEL,
                started,
                &rejection,
            )
        }
    };

    let language = language_code(&request.language);
    let emotion = trimmed(&request.payload.emotion).to_lowercase();
    let context = trimmed(&request.payload.context);

    if emotion.is_empty() {
        return FeatureEnvelope {
            feature: Some(MIND_COACH_FEATURE.to_string()),
            success: false,
            language,
            content: Some(Notice::new(
                "Please select what you are feeling (for example: anger, fear, guilt, anxiety, \
                 confusion, jealousy, sadness).",
            )),
            meta: FeatureMeta::new(MIND_COACH_MODEL, started)
                .with_error("Missing 'emotion' in payload for Mind Coach"),
        }
        .into_response_with(StatusCode::BAD_REQUEST);
    }

    let envelope = |success: bool, content: MindCoachContent, meta: FeatureMeta| FeatureEnvelope {
        feature: Some(MIND_COACH_FEATURE.to_string()),
        success,
        language: language.clone(),
        content: Some(content),
        meta,
    };

    let Some(llm) = state.llm.as_deref() else {
        error!("OPENAI_API_KEY is not set for Gita Mind Coach");
        return envelope(
            true,
            mind_coach::fallback_content(&emotion, &context),
            FeatureMeta::new(MIND_COACH_MODEL, started).with_debug_source("no-api-key"),
        )
        .into_response_with(StatusCode::OK);
    };

    match mind_coach::coach(llm, &emotion, &context, &language).await {
        Ok(content) => envelope(true, content, FeatureMeta::new(MIND_COACH_MODEL, started))
            .into_response_with(StatusCode::OK),
        Err(e) => {
            error!("Gita Mind Coach model error: {e}");
            envelope(
                false,
                mind_coach::fallback_content(&emotion, &context),
                FeatureMeta::new(MIND_COACH_MODEL, started).with_error("exception"),
            )
            .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/chat-gita-shloka
pub async fn handle_shloka(
    State(state): State<AppState>,
    body: Result<Json<ShlokaRequest>, JsonRejection>,
) -> Response {
    let started = Instant::now();
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return invalid_json::<ShlokaContent>(
                Some(SHLOKA_FEATURE),
                SHLOKA_MODEL,
                started,
                &rejection,
            )
        }
    };

    let language = language_code(&request.language);
    let envelope = |success: bool, content: Option<ShlokaContent>, meta: FeatureMeta| {
        FeatureEnvelope {
            feature: Some(SHLOKA_FEATURE.to_string()),
            success,
            language: language.clone(),
            content,
            meta,
        }
    };

    let Some(verse) = Shloka::from_payload(&request.payload) else {
        return envelope(
            false,
            None,
            FeatureMeta::new(SHLOKA_MODEL, started)
                .with_error("Missing 'ref' or 'sanskrit' in payload for Shloka-to-Life"),
        )
        .into_response_with(StatusCode::BAD_REQUEST);
    };

    let Some(llm) = state.llm.as_deref() else {
        error!("OPENAI_API_KEY is not set for Shloka-to-Life");
        return envelope(
            true,
            Some(shloka::offline_content()),
            FeatureMeta::new(SHLOKA_MODEL, started).with_debug_source("no-api-key"),
        )
        .into_response_with(StatusCode::OK);
    };

    match shloka::transform(llm, &verse, &language).await {
        Ok(content) => envelope(true, Some(content), FeatureMeta::new(SHLOKA_MODEL, started))
            .into_response_with(StatusCode::OK),
        Err(e) => {
            error!("Shloka-to-Life model error for {}: {e}", verse.reference);
            envelope(
                false,
                Some(shloka::error_content()),
                FeatureMeta::new(SHLOKA_MODEL, started).with_error("exception"),
            )
            .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
