pub mod health;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::aurobindo::handlers as aurobindo;
use crate::gita::handlers as gita;
use crate::state::AppState;
use crate::tartam::handlers::handle_counsel;
use crate::tartam::{BeetakDharma, TartamCompass, VirahaConsoler};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Gita Ashram
        .route("/api/chat-gita", post(gita::handle_chat_gita))
        .route("/api/chat-gita-mind-coach", post(gita::handle_mind_coach))
        .route("/api/chat-gita-shloka", post(gita::handle_shloka))
        // Pranami Tartam Ashram
        .route("/api/chat-pranami", post(handle_counsel::<TartamCompass>))
        .route("/api/chat-viraha", post(handle_counsel::<VirahaConsoler>))
        .route("/api/chat-pranami-dharma", post(handle_counsel::<BeetakDharma>))
        // Sri Aurobindo & The Mother
        .route("/api/chat", post(aurobindo::handle_chat))
        .with_state(state)
}

/// CORS for the known front-ends. Unknown origins get no allow-origin header.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid CORS origin '{origin}'");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::gita::corpus::VerseCorpus;
    use crate::llm_client::{ChatOptions, FileSearchRequest, LanguageModel, LlmError};

    /// Answers every call with a canned reply, or fails when the reply is `None`.
    struct StubModel {
        chat: Option<&'static str>,
        respond: Option<&'static str>,
    }

    fn upstream_failure() -> LlmError {
        LlmError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        }
    }

    #[async_trait]
    impl LanguageModel for StubModel {
        async fn chat(&self, _s: &str, _u: &str, _o: ChatOptions) -> Result<String, LlmError> {
            self.chat.map(str::to_string).ok_or_else(upstream_failure)
        }

        async fn respond(&self, _r: FileSearchRequest<'_>) -> Result<String, LlmError> {
            self.respond.map(str::to_string).ok_or_else(upstream_failure)
        }
    }

    fn app(llm: Option<StubModel>) -> Router {
        let llm = llm.map(|m| Arc::new(m) as Arc<dyn LanguageModel>);
        build_router(AppState {
            llm,
            corpus: Arc::new(VerseCorpus::builtin().unwrap()),
            config: Config::default(),
        })
    }

    fn failing_model() -> Option<StubModel> {
        Some(StubModel {
            chat: None,
            respond: None,
        })
    }

    async fn post_raw(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        post_raw(app, uri, &body.to_string()).await
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ok"], true);
        assert_eq!(body["project"], "atma-samvad");
        assert!(body["ts"].as_i64().unwrap() > 0);
    }

    // ── Gita Ashram ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_chat_gita_invalid_json() {
        let (status, body) = post_raw(app(None), "/api/chat-gita", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["feature"].is_null());
        assert!(body["content"].is_null());
        assert_eq!(body["meta"]["model"], "gita-decisions-v1");
        assert_eq!(body["meta"]["error"], "Invalid JSON body");
    }

    #[tokio::test]
    async fn test_chat_gita_defaults_to_qna_notice() {
        let (status, body) = post(app(None), "/api/chat-gita", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["feature"], "qna");
        assert_eq!(body["language"], "en");
        assert_eq!(body["meta"]["depth"], "standard");
        assert!(body["content"]["message"]
            .as_str()
            .unwrap()
            .contains("not implemented yet"));
    }

    #[tokio::test]
    async fn test_decision_compass_offline_uses_corpus() {
        let (status, body) = post(
            app(None),
            "/api/chat-gita",
            json!({
                "feature": "decision_compass",
                "depth": "deep",
                "payload": {
                    "situation": "I am anxious about a job change and my career",
                    "emotion": "anxious"
                }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["meta"]["depth"], "deep");

        let content = &body["content"];
        assert_eq!(content["inputEcho"]["lifeArea"], "general");
        let verses = content["verses"].as_array().unwrap();
        assert!(!verses.is_empty() && verses.len() <= 3);
        assert!(verses[0]["whyRelevant"]
            .as_str()
            .unwrap()
            .starts_with("This verse speaks about"));
        assert_eq!(content["actionPlan"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_decision_compass_merges_model_output() {
        let model = StubModel {
            chat: Some(r#"{"summary": "Walk the path of duty.", "gitaLens": ["Act without clinging."]}"#),
            respond: None,
        };
        let (_, body) = post(
            app(Some(model)),
            "/api/chat-gita",
            json!({"feature": "decision_compass", "payload": {"situation": "Should I move cities?"}}),
        )
        .await;
        assert_eq!(body["content"]["summary"], "Walk the path of duty.");
        assert_eq!(body["content"]["gitaLens"], json!(["Act without clinging."]));
        assert_eq!(body["content"]["reflectionQuestions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_mind_coach_requires_emotion() {
        let (status, body) = post(
            app(None),
            "/api/chat-gita-mind-coach",
            json!({"language": "hi", "payload": {"context": "work stress"}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["feature"], "mind_coach");
        assert_eq!(body["language"], "hi");
        assert!(body["content"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Please select what you are feeling"));
        assert_eq!(body["meta"]["error"], "Missing 'emotion' in payload for Mind Coach");
    }

    #[tokio::test]
    async fn test_null_payload_is_treated_as_empty() {
        let (status, body) = post(
            app(None),
            "/api/chat-gita-mind-coach",
            json!({"payload": null}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["meta"]["error"], "Missing 'emotion' in payload for Mind Coach");

        let (status, body) =
            post(app(None), "/api/chat-gita-shloka", json!({"payload": null})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["content"].is_null());
    }

    #[tokio::test]
    async fn test_mind_coach_without_key_serves_fallback() {
        let (status, body) = post(
            app(None),
            "/api/chat-gita-mind-coach",
            json!({"payload": {"emotion": "  ANGER "}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["content"]["emotionLabel"], "Anger");
        assert_eq!(body["meta"]["_debugSource"], "no-api-key");
        assert_eq!(body["meta"]["model"], "gita-mind-coach-v1");
    }

    #[tokio::test]
    async fn test_mind_coach_model_error_is_500_with_fallback() {
        let (status, body) = post(
            app(failing_model()),
            "/api/chat-gita-mind-coach",
            json!({"payload": {"emotion": "fear"}}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["content"]["emotionLabel"], "Fear");
        assert_eq!(body["meta"]["error"], "exception");
    }

    #[tokio::test]
    async fn test_mind_coach_success_is_sanitised() {
        let model = StubModel {
            chat: Some(r#"{"emotionLabel": "Fear", "reframeBullets": null}"#),
            respond: None,
        };
        let (status, body) = post(
            app(Some(model)),
            "/api/chat-gita-mind-coach",
            json!({"payload": {"emotion": "fear"}}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"]["emotionLabel"], "Fear");
        assert_eq!(body["content"]["reframeBullets"], json!([]));
        assert_eq!(body["content"]["experiment24h"], "");
        assert!(body["meta"].get("error").is_none());
    }

    #[tokio::test]
    async fn test_shloka_requires_ref_and_sanskrit() {
        let (status, body) = post(
            app(None),
            "/api/chat-gita-shloka",
            json!({"payload": {"ref": "BG 2.47", "sanskrit": []}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["feature"], "shloka_to_life");
        assert!(body["content"].is_null());
    }

    #[tokio::test]
    async fn test_shloka_offline_and_error_content() {
        let payload = json!({"payload": {"ref": "BG 2.47", "sanskrit": ["कर्मण्येवाधिकारस्ते"]}});

        let (status, body) = post(app(None), "/api/chat-gita-shloka", payload.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["content"]["plain"]
            .as_str()
            .unwrap()
            .contains("temporarily offline"));

        let (status, body) = post(app(failing_model()), "/api/chat-gita-shloka", payload).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["content"]["work"], json!([]));
        assert_eq!(body["meta"]["error"], "exception");
    }

    // ── Pranami Tartam Ashram ───────────────────────────────────────────────

    #[tokio::test]
    async fn test_tartam_requires_question() {
        let (status, body) = post(app(None), "/api/chat-pranami", json!({"question": "  "})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["verse_snippet"], "");
        assert_eq!(body["error"], "Missing 'question' in request body");
        assert_eq!(body["meta"]["usedVectorStore"], false);
    }

    #[tokio::test]
    async fn test_tartam_without_key_reports_error_with_200() {
        let (status, body) = post(
            app(None),
            "/api/chat-viraha",
            json!({"question": "I miss my late father", "language": "GU"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "OPENAI_API_KEY is not set on the server.");
        assert_eq!(body["meta"]["error"], "OPENAI_API_KEY is not set on the server.");
        assert_eq!(body["explanation"], "");
    }

    #[tokio::test]
    async fn test_tartam_upstream_message_surfaces() {
        let (status, body) = post(
            app(failing_model()),
            "/api/chat-pranami",
            json!({"question": "How do I serve my family?"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], "service unavailable");
    }

    #[tokio::test]
    async fn test_tartam_compass_success() {
        let model = StubModel {
            chat: None,
            respond: Some(r#"{"verse_snippet": "v", "explanation": "e", "directive": "d"}"#),
        };
        let (status, body) = post(
            app(Some(model)),
            "/api/chat-pranami",
            json!({"question": "How do I serve my family?", "language": "hi"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["verse_snippet"], "v");
        assert_eq!(body["directive"], "d");
        assert!(body.get("error").is_none());
        assert!(body["meta"]["error"].is_null());
        assert_eq!(body["meta"]["usedVectorStore"], true);
        assert_eq!(body["meta"]["language"], "hi");
        assert!(body["meta"].get("category").is_none());
    }

    #[tokio::test]
    async fn test_dharma_echoes_category() {
        let reply = Some(r#"{"dharma_principles": "p", "reasoning": "r", "steps": "s"}"#);

        let (_, body) = post(
            app(Some(StubModel { chat: None, respond: reply })),
            "/api/chat-pranami-dharma",
            json!({"question": "Parents oppose my marriage", "category": " family "}),
        )
        .await;
        assert_eq!(body["dharma_principles"], "p");
        assert_eq!(body["meta"]["category"], "family");

        let (_, body) = post(
            app(Some(StubModel { chat: None, respond: reply })),
            "/api/chat-pranami-dharma",
            json!({"question": "Parents oppose my marriage"}),
        )
        .await;
        assert!(body["meta"]["category"].is_null());
        assert!(body["meta"].get("category").is_some());
    }

    // ── Sri Aurobindo & The Mother ──────────────────────────────────────────

    #[tokio::test]
    async fn test_chat_without_key_is_misconfigured() {
        let (status, body) = post(app(None), "/api/chat", json!({"mode": "nope"})).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Server misconfigured: missing OPENAI_API_KEY");
    }

    #[tokio::test]
    async fn test_chat_qa() {
        let model = StubModel {
            chat: Some("The psychic being is the soul's evolving representative."),
            respond: None,
        };
        let (status, body) = post(
            app(Some(model)),
            "/api/chat",
            json!({"mode": "samvad", "guru": "aurobindo", "action": "qa", "question": "What is the psychic being?"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["answer"].as_str().unwrap().starts_with("The psychic being"));
        assert_eq!(body["sources"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_chat_qa_requires_question() {
        let (status, body) = post(
            app(failing_model()),
            "/api/chat",
            json!({"mode": "samvad", "guru": "aurobindo", "action": "qa", "question": " "}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Question required");
    }

    #[tokio::test]
    async fn test_chat_qa_upstream_failure() {
        let (status, body) = post(
            app(failing_model()),
            "/api/chat",
            json!({"mode": "samvad", "guru": "aurobindo", "action": "qa", "question": "Why?"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Upstream model error");
    }

    #[tokio::test]
    async fn test_day_reading_validation() {
        let (status, body) = post(
            app(failing_model()),
            "/api/chat",
            json!({"mode": "dayReading", "day": "3", "theme": "Surrender"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Valid 'day' (integer) is required");

        let (status, body) = post(
            app(failing_model()),
            "/api/chat",
            json!({"mode": "dayReading", "day": 3, "theme": ""}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "A 'theme' string is required");
    }

    #[tokio::test]
    async fn test_day_reading_success() {
        let model = StubModel {
            chat: None,
            respond: Some(r#"{"text": "All life is yoga.", "work": "The Synthesis of Yoga", "section": "Introduction"}"#),
        };
        let (status, body) = post(
            app(Some(model)),
            "/api/chat",
            json!({"mode": "dayReading", "day": 1, "theme": "Aspiration", "minWords": 10}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["day"], 1);
        assert_eq!(body["guruId"], "sri-aurobindo");
        assert_eq!(body["passage"]["work"], "The Synthesis of Yoga");
        assert!(body["passage"]["sourceId"].is_null());
    }

    #[tokio::test]
    async fn test_day_reading_upstream_failure() {
        let (status, body) = post(
            app(failing_model()),
            "/api/chat",
            json!({"mode": "dayReading", "day": 2, "theme": "Equality"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Upstream model error (dayReading)");
    }

    #[tokio::test]
    async fn test_chat_bad_envelope_echoes_triple() {
        let (status, body) = post(
            app(failing_model()),
            "/api/chat",
            json!({"mode": "samvad", "guru": "mother", "action": "qa"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad request envelope");
        assert_eq!(body["got"], json!({"mode": "samvad", "guru": "mother", "action": "qa"}));
    }

    #[tokio::test]
    async fn test_chat_unreadable_body_is_bad_envelope() {
        let (status, body) = post_raw(app(failing_model()), "/api/chat", "{oops").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["got"], json!({}));
    }

    // ── CORS ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_cors_preflight_for_known_origin() {
        let app = app(None).layer(cors_layer(&Config::default().allowed_origins));
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/chat-gita")
            .header("origin", "https://samvad.atmavani.life")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "https://samvad.atmavani.life"
        );
        assert_eq!(response.headers()["access-control-allow-credentials"], "true");
    }

    #[tokio::test]
    async fn test_cors_ignores_unknown_origin() {
        let app = app(None).layer(cors_layer(&Config::default().allowed_origins));
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/chat-gita")
            .header("origin", "https://evil.example")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert!(response
            .headers()
            .get("access-control-allow-origin")
            .is_none());
    }
}
