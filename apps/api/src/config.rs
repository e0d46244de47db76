use anyhow::{Context, Result};

use crate::llm_client;
use crate::translation;

/// Application configuration loaded from environment variables.
/// Fails at startup if the Google API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub translate_base_url: String,
    pub http_timeout_secs: u64,
    pub session_ttl_minutes: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            gemini_model: optional_env("GEMINI_MODEL", llm_client::DEFAULT_MODEL),
            gemini_base_url: optional_env("GEMINI_BASE_URL", llm_client::DEFAULT_BASE_URL),
            translate_base_url: optional_env("TRANSLATE_BASE_URL", translation::DEFAULT_BASE_URL),
            http_timeout_secs: optional_env("HTTP_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            session_ttl_minutes: optional_env("SESSION_TTL_MINUTES", "30")
                .parse::<i64>()
                .ok()
                .filter(|m| *m > 0)
                .context("SESSION_TTL_MINUTES must be a positive number of minutes")?,
            port: optional_env("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
