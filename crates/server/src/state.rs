use outreach_common::{AppConfig, Result};
use outreach_llm::{OpenAiClient, TextGenerator};
use std::sync::Arc;
use tracing::warn;

use crate::workflow::DraftWorkflow;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Draft pipeline
    pub workflow: DraftWorkflow,
}

impl AppState {
    /// Create new application state
    ///
    /// A missing credential disables generation instead of failing startup.
    pub fn new(config: AppConfig) -> Result<Self> {
        let generator: Option<Arc<dyn TextGenerator>> = match OpenAiClient::new(&config) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn TextGenerator>),
            Err(e) if e.is_config() => {
                warn!("{}. Email generation is disabled.", e);
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self::with_generator(config, generator))
    }

    /// Create state with an explicit generator
    pub fn with_generator(config: AppConfig, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        let workflow = DraftWorkflow::new(generator, config.llm_temperature);
        Self { config, workflow }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_disables_generation() {
        let state = AppState::new(AppConfig::default()).unwrap();
        assert!(!state.workflow.generation_enabled());
    }

    #[test]
    fn test_key_enables_generation() {
        let config = AppConfig {
            openai_api_key: Some("sk-test".to_string()),
            ..AppConfig::default()
        };
        let state = AppState::new(config).unwrap();
        assert!(state.workflow.generation_enabled());
        assert_eq!(state.workflow.model(), Some("gpt-3.5-turbo-instruct"));
    }
}
