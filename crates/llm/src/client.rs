use async_trait::async_trait;
use outreach_common::{AppConfig, OutreachError, Result};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::llm_trait::TextGenerator;
use crate::types::{ApiErrorBody, CompletionRequest, CompletionResponse};

/// Failure of a single attempt
struct AttemptError {
    error: OutreachError,

    /// Transport failures, timeouts, 429 and 5xx are worth another attempt
    retryable: bool,
}

impl AttemptError {
    fn retryable(error: OutreachError) -> Self {
        Self {
            error,
            retryable: true,
        }
    }

    fn fatal(error: OutreachError) -> Self {
        Self {
            error,
            retryable: false,
        }
    }
}

/// Whether a failed HTTP status may succeed on retry
fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Client for an OpenAI-compatible text completion service
#[derive(Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    max_attempts: u32,
    timeout: Duration,
    client: Client,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("max_attempts", &self.max_attempts)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Create a client from configuration
    ///
    /// Fails with a configuration error when no credential is set.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api_key = config
            .openai_api_key
            .clone()
            .ok_or_else(|| OutreachError::config("OPENAI_API_KEY is not set"))?;

        let timeout = Duration::from_secs(config.llm_timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!(
            "Completion client initialized: {} (model: {})",
            config.openai_base_url, config.llm_model
        );

        Ok(Self {
            base_url: config.openai_base_url.clone(),
            api_key,
            model: config.llm_model.clone(),
            max_tokens: config.llm_max_tokens,
            max_attempts: config.llm_max_attempts,
            timeout,
            client,
        })
    }

    /// Generate text (retrying transient failures up to the configured attempt count)
    pub async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
        let request = CompletionRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            temperature,
            max_tokens: Some(self.max_tokens),
        };

        self.complete_with_retry(&request, self.max_attempts).await
    }

    async fn complete_with_retry(
        &self,
        request: &CompletionRequest,
        max_attempts: u32,
    ) -> Result<String> {
        let url = format!("{}/v1/completions", self.base_url);

        debug!(
            "Sending completion request - Model: {}, Prompt length: {}, Temperature: {}",
            request.model,
            request.prompt.len(),
            request.temperature
        );

        let mut last_error = None;

        for attempt in 1..=max_attempts {
            match self.try_complete(&url, request).await {
                Ok(text) => {
                    debug!("Received completion - Length: {}", text.len());
                    return Ok(text);
                }
                Err(AttemptError { error, retryable }) => {
                    if !retryable {
                        return Err(error);
                    }
                    if attempt < max_attempts {
                        let delay = Duration::from_secs(2u64.pow(attempt - 1));
                        warn!(
                            "Completion request failed (attempt {}/{}): {}. Retrying in {:?}...",
                            attempt, max_attempts, error, delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| OutreachError::service("No attempts were made")))
    }

    /// Single attempt
    async fn try_complete(
        &self,
        url: &str,
        request: &CompletionRequest,
    ) -> std::result::Result<String, AttemptError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AttemptError::retryable(self.transport_error(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(ApiErrorBody { error }) => match error.kind {
                    Some(kind) => format!("{} [{}]", error.message.trim(), kind),
                    None => error.message.trim().to_string(),
                },
                Err(_) => body.trim().to_string(),
            };
            let error = OutreachError::service(format!(
                "Completion API error ({}): {}",
                status, message
            ));
            return Err(if is_retryable_status(status) {
                AttemptError::retryable(error)
            } else {
                AttemptError::fatal(error)
            });
        }

        let result: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AttemptError::fatal(self.transport_error(e)))?;

        let choice = result
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| {
                AttemptError::fatal(OutreachError::service(
                    "Completion response contained no choices",
                ))
            })?;

        if choice.finish_reason.as_deref() == Some("length") {
            debug!("Completion stopped at the token limit ({})", self.max_tokens);
        }

        let text = choice.text.trim();
        if text.is_empty() {
            return Err(AttemptError::fatal(OutreachError::service(
                "Empty response from completion service",
            )));
        }

        Ok(text.to_string())
    }

    fn transport_error(&self, e: reqwest::Error) -> OutreachError {
        if e.is_timeout() {
            OutreachError::service(format!("Request timed out after {:?}", self.timeout))
        } else if e.is_decode() {
            OutreachError::service(format!("Failed to parse response: {}", e))
        } else {
            OutreachError::service(format!("Failed to send request: {}", e))
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
        self.complete(prompt, temperature).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
