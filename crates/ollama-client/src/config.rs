//! Configuration for the Ollama generator.

use llm_core::GeneratorError;
use std::env;
use std::time::Duration;

/// Default Ollama server address.
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:11434";

/// Default model identifier.
pub const DEFAULT_MODEL_NAME: &str = "exaone3.5:7.8b";

/// Default bound on one blocking request, in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 60_000;

/// Configuration for [`OllamaGenerator`](crate::OllamaGenerator).
///
/// | Option | Meaning | Default |
/// |--------|---------|---------|
/// | `endpoint_url` | Target service address | `http://localhost:11434` |
/// | `model_name` | Model identifier to request | `exaone3.5:7.8b` |
/// | `request_timeout_ms` | Bound on each blocking call | `60000` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OllamaConfig {
    /// Ollama server URL, without a trailing slash.
    pub endpoint_url: String,

    /// Model name to use.
    pub model_name: String,

    /// Timeout for each HTTP request, in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl OllamaConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `OLLAMA_URL` - Server URL (default: http://localhost:11434)
    /// - `OLLAMA_MODEL` - Model name (default: exaone3.5:7.8b)
    /// - `OLLAMA_TIMEOUT_MS` - Request timeout in ms (default: 60000)
    pub fn from_env() -> Result<Self, GeneratorError> {
        let endpoint_url = match env::var("OLLAMA_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => {
                tracing::warn!("OLLAMA_URL not set, using default: {}", DEFAULT_ENDPOINT_URL);
                DEFAULT_ENDPOINT_URL.to_string()
            }
        };

        let model_name =
            env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL_NAME.to_string());

        let request_timeout_ms = match env::var("OLLAMA_TIMEOUT_MS") {
            Ok(value) => value.trim().parse().map_err(|_| {
                GeneratorError::Configuration(format!("OLLAMA_TIMEOUT_MS is not a number: {}", value))
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_MS,
        };

        Self {
            endpoint_url,
            model_name,
            request_timeout_ms,
        }
        .validated()
    }

    /// Create a new config builder.
    pub fn builder() -> OllamaConfigBuilder {
        OllamaConfigBuilder::default()
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.endpoint_url)
    }

    /// URL used as the health probe.
    pub fn tags_url(&self) -> String {
        format!("{}/api/tags", self.endpoint_url)
    }

    fn validated(mut self) -> Result<Self, GeneratorError> {
        self.endpoint_url = self.endpoint_url.trim().trim_end_matches('/').to_string();

        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://") {
            return Err(GeneratorError::Configuration(format!(
                "endpoint URL must start with http:// or https://: {}",
                self.endpoint_url
            )));
        }

        if self.model_name.trim().is_empty() {
            return Err(GeneratorError::Configuration(
                "model name cannot be empty".to_string(),
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err(GeneratorError::Configuration(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(self)
    }
}

/// Builder for OllamaConfig.
#[derive(Debug, Default)]
pub struct OllamaConfigBuilder {
    config: OllamaConfig,
}

impl OllamaConfigBuilder {
    /// Set the server URL.
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model_name(mut self, model: impl Into<String>) -> Self {
        self.config.model_name = model.into();
        self
    }

    /// Set the request timeout in milliseconds.
    pub fn request_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.request_timeout_ms = timeout_ms;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<OllamaConfig, GeneratorError> {
        self.config.validated()
    }
}
