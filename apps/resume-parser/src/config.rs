use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{GeminiSettings, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

/// CLI configuration loaded from environment variables (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub llm_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        Ok(Config {
            gemini_api_key: require("GEMINI_API_KEY")?,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            llm_timeout_secs: lookup("LLM_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn gemini_settings(&self) -> GeminiSettings {
        GeminiSettings {
            api_key: Some(self.gemini_api_key.clone()),
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
        }
    }
}
