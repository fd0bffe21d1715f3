mod aurobindo;
mod config;
mod errors;
mod gita;
mod llm_client;
mod models;
mod routes;
mod state;
mod tartam;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gita::corpus::VerseCorpus;
use crate::llm_client::{LanguageModel, LlmClient};
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Atma Samvad API v{}", env!("CARGO_PKG_VERSION"));

    // Verse corpus: file override, else the embedded copy
    let corpus = match &config.gita_corpus_path {
        Some(path) => VerseCorpus::from_path(path)
            .with_context(|| format!("failed to load verse corpus from {}", path.display()))?,
        None => VerseCorpus::builtin().context("embedded verse corpus is invalid")?,
    };
    info!("Verse corpus loaded ({} verses)", corpus.len());

    // LLM client only when a key is configured
    let llm: Option<Arc<dyn LanguageModel>> = match &config.openai_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        None => {
            warn!("OPENAI_API_KEY is not set; endpoints will serve fallback content");
            None
        }
    };

    let state = AppState {
        llm,
        corpus: Arc::new(corpus),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
