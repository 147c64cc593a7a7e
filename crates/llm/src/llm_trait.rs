use async_trait::async_trait;
use outreach_common::Result;

/// Common trait for text generation backends
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text from a prompt at the given temperature
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String>;

    /// Model name used for generation
    fn model(&self) -> &str;
}
