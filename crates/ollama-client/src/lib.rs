//! Ollama-backed text generator.
//!
//! This crate provides a [`Generator`] implementation that talks to an
//! Ollama server over its HTTP API.
//!
//! # Features
//!
//! - Non-streaming `/api/chat` calls with temperature and output-token limits
//! - Token usage taken from `prompt_eval_count` / `eval_count`
//! - Availability probe via `/api/tags`
//! - Per-request timeout; expiry is reported as [`GeneratorError::Timeout`]
//! - Configurable via builder or environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use ollama_client::{ChatMessage, GenerationOptions, Generator, OllamaGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let generator = OllamaGenerator::from_env()?;
//!     if generator.is_available().await {
//!         let reply = generator
//!             .generate(&[ChatMessage::user("Hello")], GenerationOptions::default())
//!             .await?;
//!         println!("{}", reply.content);
//!     }
//!     Ok(())
//! }
//! ```

mod api_types;
mod config;
mod generator;

pub use config::{
    OllamaConfig, OllamaConfigBuilder, DEFAULT_ENDPOINT_URL, DEFAULT_MODEL_NAME,
    DEFAULT_REQUEST_TIMEOUT_MS,
};
pub use generator::OllamaGenerator;

// Re-export llm-core types for convenience
pub use llm_core::{
    async_trait, ChatMessage, Generation, GenerationOptions, Generator, GeneratorError, Role,
    TokenUsage,
};
