//! The generator trait.

use async_trait::async_trait;

use crate::error::GeneratorError;
use crate::message::{ChatMessage, Generation, GenerationOptions};

/// A text generation backend.
///
/// Implementations make a single round-trip per call and never retry;
/// callers decide how to degrade when a call fails.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a reply to the given role-tagged messages.
    async fn generate(
        &self,
        messages: &[ChatMessage],
        options: GenerationOptions,
    ) -> Result<Generation, GeneratorError>;

    /// Cheap availability probe, called before generating.
    ///
    /// Defaults to `true` for backends without a health endpoint.
    async fn is_available(&self) -> bool {
        true
    }

    /// Human-readable backend name, used in logs.
    fn name(&self) -> &str;
}
