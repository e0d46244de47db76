//! Translation client and the acknowledgement step of a submission.
//!
//! Talks to the public Google Translate `translate_a/single` endpoint with
//! source-language autodetection.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::candidate::models::Language;
use crate::llm_client::summarize_error_body;

pub const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Shown to every candidate after a successful submission.
pub const ACKNOWLEDGEMENT: &str =
    "Thank you for your tech stack. Your answers will help us assess your skills.";

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("translation service returned no text")]
    EmptyTranslation,
}

/// The URL carries the text being translated; keep it out of error messages.
impl From<reqwest::Error> for TranslationError {
    fn from(e: reqwest::Error) -> Self {
        TranslationError::Network(e.without_url())
    }
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError>;
}

#[derive(Clone)]
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError> {
        let response = self
            .client
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Translation to {target} failed with status {status}");
            return Err(TranslationError::Api {
                status: status.as_u16(),
                message: summarize_error_body(status, &body),
            });
        }

        let translated = extract_translation(&body)?;
        debug!("Translated {} chars into {target}", text.len());
        Ok(translated)
    }
}

/// The body is a nested array: `[[["segment", "source", ...], ...], null, "en", ...]`.
/// The translation is the first element of every segment, concatenated.
fn extract_translation(body: &str) -> Result<String, TranslationError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| {
            TranslationError::MalformedResponse("missing translation segments".to_string())
        })?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        return Err(TranslationError::EmptyTranslation);
    }
    Ok(text)
}

// ────────────────────────────────────────────────────────────────────────────
// Acknowledgement step
// ────────────────────────────────────────────────────────────────────────────

/// What the candidate sees after their questions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AcknowledgementOutcome {
    Original { text: String },
    Translated { language: Language, text: String },
    Failed { error: String },
}

/// English is returned verbatim without touching the translator.
pub async fn acknowledge(translator: &dyn Translator, language: Language) -> AcknowledgementOutcome {
    if language == Language::English {
        return AcknowledgementOutcome::Original {
            text: ACKNOWLEDGEMENT.to_string(),
        };
    }

    match translator.translate(ACKNOWLEDGEMENT, language).await {
        Ok(text) => AcknowledgementOutcome::Translated { language, text },
        Err(e) => {
            warn!("Acknowledgement translation failed: {e}");
            AcknowledgementOutcome::Failed {
                error: e.to_string(),
            }
        }
    }
}
