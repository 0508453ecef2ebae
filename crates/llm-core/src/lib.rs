//! Core trait and types for text generators.
//!
//! This crate provides the shared interface between COMPASS request handling
//! and whatever language model produces text. It defines:
//!
//! - [`Generator`] - The trait that all generator backends implement
//! - [`ChatMessage`] / [`GenerationOptions`] - Request inputs
//! - [`Generation`] / [`TokenUsage`] - Generated text and its token counts
//! - [`GeneratorError`] - Error types for generator operations
//!
//! # Example
//!
//! ```rust
//! use llm_core::{async_trait, ChatMessage, Generation, GenerationOptions, Generator, GeneratorError, TokenUsage};
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl Generator for Canned {
//!     async fn generate(
//!         &self,
//!         _messages: &[ChatMessage],
//!         _options: GenerationOptions,
//!     ) -> Result<Generation, GeneratorError> {
//!         Ok(Generation::new("Hello!", "canned", TokenUsage::default()))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Canned"
//!     }
//! }
//! ```

mod error;
mod generator;
mod message;

pub use error::GeneratorError;
pub use generator::Generator;
pub use message::{ChatMessage, Generation, GenerationOptions, Role, TokenUsage};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
