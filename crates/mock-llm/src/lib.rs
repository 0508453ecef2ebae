//! Mock generator implementations for testing.
//!
//! This crate provides deterministic implementations of the `Generator` trait:
//! - `ScriptedGenerator` - Replies with fixed text and records every call
//! - `OfflineGenerator` - Behaves like an unreachable server
//!
//! For production use, see the `ollama-client` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_llm::{ChatMessage, GenerationOptions, Generator, ScriptedGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_llm::GeneratorError> {
//!     let generator = ScriptedGenerator::new("Recursion is a function calling itself.");
//!
//!     let reply = generator
//!         .generate(&[ChatMessage::user("What is recursion?")], GenerationOptions::default())
//!         .await?;
//!     assert_eq!(generator.calls(), 1);
//!     println!("Response: {}", reply.content);
//!     Ok(())
//! }
//! ```

mod offline;
mod scripted;

// Re-export llm-core types for convenience
pub use llm_core::{
    async_trait, ChatMessage, Generation, GenerationOptions, Generator, GeneratorError, Role,
    TokenUsage,
};

pub use offline::OfflineGenerator;
pub use scripted::ScriptedGenerator;
