use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

/// GET /health
/// Liveness probe with the server's clock in unix milliseconds.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "ok": true,
        "project": "atma-samvad",
        "ts": Utc::now().timestamp_millis()
    }))
}
