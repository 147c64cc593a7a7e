/// Outreach error types
#[derive(Debug, thiserror::Error)]
pub enum OutreachError {
    /// Configuration error (missing credential, bad value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote text generation failed
    #[error("Service error: {0}")]
    Service(String),

    /// Prompt template could not be rendered
    #[error("Template error: {0}")]
    Template(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OutreachError {
    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create service error
    pub fn service<S: Into<String>>(msg: S) -> Self {
        Self::Service(msg.into())
    }

    /// Create template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Whether this error means generation is unavailable rather than failed
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
