use crate::error::OutreachError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Outreach application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Credential for the text-completion service (generation is disabled without it)
    pub openai_api_key: Option<String>,

    /// Completion service base URL
    pub openai_base_url: String,

    /// Completion model name
    pub llm_model: String,

    /// Sampling temperature used for every call
    pub llm_temperature: f32,

    /// Maximum tokens per completion
    pub llm_max_tokens: u32,

    /// Request timeout in seconds
    pub llm_timeout_secs: u64,

    /// Attempts per remote call (1 = no retry)
    pub llm_max_attempts: u32,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory (console only when unset)
    pub log_dir: Option<PathBuf>,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: "https://api.openai.com".to_string(),
            llm_model: "gpt-3.5-turbo-instruct".to_string(),
            llm_temperature: 0.5,
            llm_max_tokens: 256,
            llm_timeout_secs: 60,
            llm_max_attempts: 1,
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            log_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_base_url", &self.openai_base_url)
            .field("llm_model", &self.llm_model)
            .field("llm_temperature", &self.llm_temperature)
            .field("llm_max_tokens", &self.llm_max_tokens)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("llm_max_attempts", &self.llm_max_attempts)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("log_dir", &self.log_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, OutreachError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OutreachError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            openai_api_key: lookup("OPENAI_API_KEY")
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            openai_base_url: lookup("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.openai_base_url),
            llm_model: lookup("LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_temperature: parse_var(&lookup, "LLM_TEMPERATURE")?
                .unwrap_or(defaults.llm_temperature),
            llm_max_tokens: parse_var(&lookup, "LLM_MAX_TOKENS")?
                .unwrap_or(defaults.llm_max_tokens),
            llm_timeout_secs: parse_var(&lookup, "LLM_TIMEOUT_SECS")?
                .unwrap_or(defaults.llm_timeout_secs),
            llm_max_attempts: parse_var(&lookup, "LLM_MAX_ATTEMPTS")?
                .unwrap_or(defaults.llm_max_attempts),
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var(&lookup, "SERVER_PORT")?.unwrap_or(defaults.server_port),
            log_dir: lookup("LOG_DIR").map(PathBuf::from),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;

        Ok(config)
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), OutreachError> {
        if !self.openai_base_url.starts_with("http://")
            && !self.openai_base_url.starts_with("https://")
        {
            return Err(OutreachError::config(
                "OPENAI_BASE_URL must start with http:// or https://",
            ));
        }

        if self.llm_model.trim().is_empty() {
            return Err(OutreachError::config("LLM model name cannot be empty"));
        }

        if !(0.0..=2.0).contains(&self.llm_temperature) {
            return Err(OutreachError::config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm_temperature
            )));
        }

        if self.llm_max_tokens == 0 {
            return Err(OutreachError::config("LLM max tokens cannot be 0"));
        }

        if self.llm_timeout_secs == 0 {
            return Err(OutreachError::config("LLM timeout cannot be 0"));
        }

        if self.llm_max_attempts == 0 {
            return Err(OutreachError::config("LLM max attempts cannot be 0"));
        }

        if self.server_port == 0 {
            return Err(OutreachError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

/// Parse an optional variable, failing on values that do not parse
fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, OutreachError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| {
            OutreachError::config(format!("Invalid value for {}: '{}' ({})", key, raw, e))
        }),
    }
}
