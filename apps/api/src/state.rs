use std::sync::Arc;

use crate::llm_client::QuestionGenerator;
use crate::session::SessionStore;
use crate::translation::Translator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Question generation backend. Default: `GeminiClient`.
    pub generator: Arc<dyn QuestionGenerator>,
    /// Acknowledgement translation backend. Default: `GoogleTranslator`.
    pub translator: Arc<dyn Translator>,
    pub sessions: SessionStore,
}
