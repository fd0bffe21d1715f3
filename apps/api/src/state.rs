use std::sync::Arc;

use crate::config::Config;
use crate::gita::corpus::VerseCorpus;
use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured; handlers serve their fallbacks.
    pub llm: Option<Arc<dyn LanguageModel>>,
    /// Read-only verse corpus for the Decision Compass.
    pub corpus: Arc<VerseCorpus>,
    pub config: Config,
}
