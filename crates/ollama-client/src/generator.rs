//! OllamaGenerator implementation using the Ollama HTTP API.

use async_trait::async_trait;
use llm_core::{ChatMessage, Generation, GenerationOptions, Generator, GeneratorError, TokenUsage};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::api_types::{ApiError, ChatOptions, ChatRequest, ChatResponse};
use crate::config::OllamaConfig;

/// A generator backed by a local or remote Ollama server.
///
/// Every request is bounded by the configured timeout. Failures are returned
/// as-is; there is no retry.
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    client: Client,
    config: OllamaConfig,
}

impl OllamaGenerator {
    /// Create a new generator with the given configuration.
    pub fn new(config: OllamaConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                GeneratorError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            "OllamaGenerator initialized with model: {}, endpoint: {}, timeout: {} ms",
            config.model_name, config.endpoint_url, config.request_timeout_ms
        );

        Ok(Self { client, config })
    }

    /// Create a generator from environment variables.
    ///
    /// See [`OllamaConfig::from_env`] for the recognized variables.
    pub fn from_env() -> Result<Self, GeneratorError> {
        let config = OllamaConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn map_send_error(&self, err: reqwest::Error) -> GeneratorError {
        if err.is_timeout() {
            GeneratorError::Timeout(self.config.request_timeout_ms)
        } else {
            GeneratorError::Network(format!("Failed to send request: {}", err))
        }
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        options: GenerationOptions,
    ) -> Result<Generation, GeneratorError> {
        let request = ChatRequest {
            model: &self.config.model_name,
            messages,
            stream: false,
            options: ChatOptions {
                temperature: options.temperature,
                num_predict: options.max_output_tokens,
            },
        };

        debug!("Sending request to Ollama: {:?}", request);

        let response = self
            .client
            .post(self.config.chat_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            let message = match serde_json::from_str::<ApiError>(&error_text) {
                Ok(api_error) => api_error.error,
                Err(_) => error_text,
            };

            return Err(GeneratorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        let completion: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            GeneratorError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        debug!("Received response from Ollama: {:?}", completion);

        let usage = TokenUsage::new(
            completion.prompt_eval_count.unwrap_or(0),
            completion.eval_count.unwrap_or(0),
        );

        debug!(
            "Token usage - prompt: {}, completion: {}, total: {}",
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total()
        );

        Ok(Generation::new(
            completion.message.content,
            completion.model,
            usage,
        ))
    }

    async fn is_available(&self) -> bool {
        match self.client.get(self.config.tags_url()).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(status = %response.status(), "Ollama health check failed");
                false
            }
            Err(err) => {
                warn!(error = %err, "Ollama health check failed");
                false
            }
        }
    }

    fn name(&self) -> &str {
        "OllamaGenerator"
    }
}
