//! Axum route handler for `/api/chat`.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::aurobindo::prompts::DayReadingInput;
use crate::aurobindo::{answer_question, journey_day, read_day, word_bounds, Passage, QA_SOURCES};
use crate::errors::{AppError, EnvelopeEcho};
use crate::models::request::{trimmed, trimmed_or};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Union of the Q&A and day-reading bodies; `mode`, `guru` and `action`
/// pick the branch.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatEnvelope {
    pub mode: Option<String>,
    pub guru: Option<String>,
    pub action: Option<String>,
    // Q&A
    pub question: Option<String>,
    pub depth: Option<String>,
    // Day reading
    pub guru_id: Option<String>,
    pub day: Value,
    pub phase: Option<String>,
    pub theme: Option<String>,
    pub work_hint: Option<String>,
    pub min_words: Value,
    pub max_words: Value,
}

impl ChatEnvelope {
    fn is_qa(&self) -> bool {
        self.mode.as_deref() == Some("samvad")
            && self.guru.as_deref() == Some("aurobindo")
            && self.action.as_deref() == Some("qa")
    }

    fn is_day_reading(&self) -> bool {
        self.mode.as_deref() == Some("dayReading")
    }

    fn echo(self) -> EnvelopeEcho {
        EnvelopeEcho {
            mode: self.mode,
            guru: self.guru,
            action: self.action,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QaResponse {
    pub answer: String,
    pub sources: &'static [&'static str],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayReadingResponse {
    pub ok: bool,
    pub day: i64,
    pub guru_id: String,
    pub passage: Passage,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/chat
///
/// The API key is checked before the envelope, so a server without one
/// reports misconfiguration for every request.
pub async fn handle_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatEnvelope>, JsonRejection>,
) -> Result<Response, AppError> {
    let envelope = body.map(|Json(envelope)| envelope).unwrap_or_else(|rejection| {
        warn!("unreadable /api/chat body, treating as empty: {rejection}");
        ChatEnvelope::default()
    });

    let llm = state.llm.as_deref().ok_or(AppError::Misconfigured)?;

    if envelope.is_qa() {
        let question = trimmed(&envelope.question);
        if question.is_empty() {
            return Err(AppError::Validation("Question required".to_string()));
        }
        let depth = trimmed_or(&envelope.depth, "plain");

        let answer = answer_question(llm, &question, &depth).await?;
        return Ok(Json(QaResponse {
            answer,
            sources: &QA_SOURCES,
        })
        .into_response());
    }

    if envelope.is_day_reading() {
        let day = journey_day(&envelope.day).ok_or_else(|| {
            AppError::Validation("Valid 'day' (integer) is required".to_string())
        })?;
        let theme = trimmed(&envelope.theme);
        if theme.is_empty() {
            return Err(AppError::Validation(
                "A 'theme' string is required".to_string(),
            ));
        }
        let guru_id = trimmed_or(&envelope.guru_id, "sri-aurobindo");
        let phase = trimmed(&envelope.phase);
        let work_hint = trimmed(&envelope.work_hint);
        let (min_words, max_words) = word_bounds(&envelope.min_words, &envelope.max_words);

        let input = DayReadingInput {
            day,
            guru_id: &guru_id,
            phase: &phase,
            theme: &theme,
            work_hint: &work_hint,
            min_words,
            max_words,
        };

        let passage = read_day(llm, &state.config.aurobindo_vector_store_id, &input)
            .await
            .map_err(|e| {
                error!("day reading failed for day {day}: {e}");
                AppError::Upstream("Upstream model error (dayReading)")
            })?;

        return Ok(Json(DayReadingResponse {
            ok: true,
            day,
            guru_id,
            passage,
        })
        .into_response());
    }

    Err(AppError::BadEnvelope(envelope.echo()))
}
