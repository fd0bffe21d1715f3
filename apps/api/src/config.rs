use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "https://atma-samvad-gita-ashram-frontend.vercel.app",
    "https://samvad.atmavani.life",
    "https://www.atmavani.life",
];
const DEFAULT_TARTAM_VECTOR_STORE_ID: &str = "vs_6932802f55848191b75d5e57cbebda8d";
const DEFAULT_AUROBINDO_VECTOR_STORE_ID: &str = "vs_69171e7134a881918eec0282edbc65ab";

/// Application configuration loaded from environment variables.
/// Nothing is required: without `OPENAI_API_KEY` every endpoint still answers,
/// with its fallback or error payload.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub allowed_origins: Vec<String>,
    /// Overrides the verse corpus compiled into the binary.
    pub gita_corpus_path: Option<PathBuf>,
    pub tartam_vector_store_id: String,
    pub aurobindo_vector_store_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            openai_api_key: None,
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
            gita_corpus_path: None,
            tartam_vector_store_id: DEFAULT_TARTAM_VECTOR_STORE_ID.to_string(),
            aurobindo_vector_store_id: DEFAULT_AUROBINDO_VECTOR_STORE_ID.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source. Blank values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{port}'"))?,
            None => defaults.port,
        };

        let allowed_origins = match var("ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.allowed_origins,
        };

        Ok(Config {
            openai_api_key: var("OPENAI_API_KEY"),
            port,
            rust_log: var("RUST_LOG").unwrap_or(defaults.rust_log),
            allowed_origins,
            gita_corpus_path: var("GITA_CORPUS_PATH").map(PathBuf::from),
            tartam_vector_store_id: var("TARTAM_VECTOR_STORE_ID")
                .unwrap_or(defaults.tartam_vector_store_id),
            aurobindo_vector_store_id: var("AUROBINDO_VECTOR_STORE_ID")
                .unwrap_or(defaults.aurobindo_vector_store_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.openai_api_key, None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.allowed_origins.len(), 3);
        assert_eq!(config.tartam_vector_store_id, "vs_6932802f55848191b75d5e57cbebda8d");
        assert!(config.gita_corpus_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "3000"),
            ("ALLOWED_ORIGINS", "http://localhost:5173, ,https://example.org"),
            ("GITA_CORPUS_PATH", "/srv/verses.json"),
            ("AUROBINDO_VECTOR_STORE_ID", "vs_local"),
        ])
        .unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.port, 3000);
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:5173", "https://example.org"]
        );
        assert_eq!(config.gita_corpus_path, Some(PathBuf::from("/srv/verses.json")));
        assert_eq!(config.aurobindo_vector_store_id, "vs_local");
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = config_from(&[("OPENAI_API_KEY", "   ")]).unwrap();
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn test_invalid_port_fails() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT must be a valid port number"));
    }
}
