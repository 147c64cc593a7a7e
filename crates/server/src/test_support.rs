use actix_web::web;
use async_trait::async_trait;
use outreach_common::{AppConfig, OutreachError, Result};
use outreach_llm::TextGenerator;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::state::AppState;

/// Generator that replays scripted replies and records every call
pub(crate) struct ScriptedGenerator {
    replies: Mutex<VecDeque<std::result::Result<&'static str, &'static str>>>,
    calls: Mutex<Vec<(String, f32)>>,
}

impl ScriptedGenerator {
    pub(crate) fn new(replies: Vec<std::result::Result<&'static str, &'static str>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Prompts and temperatures received so far
    pub(crate) fn calls(&self) -> Vec<(String, f32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));

        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text.to_string()),
            Some(Err(message)) => Err(OutreachError::service(message)),
            None => Err(OutreachError::service("no scripted reply left")),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Shared state with default configuration and an optional scripted generator
pub(crate) fn test_state(generator: Option<Arc<ScriptedGenerator>>) -> web::Data<Arc<AppState>> {
    let generator = generator.map(|g| g as Arc<dyn TextGenerator>);
    web::Data::new(Arc::new(AppState::with_generator(
        AppConfig::default(),
        generator,
    )))
}
