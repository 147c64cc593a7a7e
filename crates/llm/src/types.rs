use serde::{Deserialize, Serialize};

/// Completion request (OpenAI-compatible `/v1/completions`)
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Model name (e.g., "gpt-3.5-turbo-instruct")
    pub model: String,

    /// Prompt text
    pub prompt: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Completion response
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

/// A single generated choice
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    /// Generated text
    pub text: String,

    /// Why generation stopped ("stop", "length")
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Error body returned by the service on failure
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,

    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}
