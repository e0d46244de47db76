//! Fakes shared by handler and pipeline tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use crate::candidate::models::Language;
use crate::llm_client::{LlmError, QuestionGenerator};
use crate::session::SessionStore;
use crate::state::AppState;
use crate::translation::{TranslationError, Translator};

/// Serves `router` on an ephemeral localhost port and returns its base URL.
pub async fn spawn_fake_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake server");
    let addr = listener.local_addr().expect("fake server addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake server");
    });
    format!("http://{addr}")
}

/// Generator that returns a canned reply and records every prompt.
pub struct FakeGenerator {
    reply: Result<String, (u16, String)>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err((status, message.to_string())),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err((status, message)) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

/// Translator that returns a canned reply and records every call.
pub struct FakeTranslator {
    reply: Result<String, String>,
    calls: Mutex<Vec<(String, Language)>>,
}

impl FakeTranslator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, Language)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError> {
        self.calls.lock().unwrap().push((text.to_string(), target));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(TranslationError::Api {
                status: 502,
                message: message.clone(),
            }),
        }
    }
}

pub fn test_state(generator: Arc<FakeGenerator>, translator: Arc<FakeTranslator>) -> AppState {
    AppState {
        generator,
        translator,
        sessions: SessionStore::new(chrono::Duration::minutes(30)),
    }
}
