//! Offline generator - behaves like an unreachable server.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use llm_core::{ChatMessage, Generation, GenerationOptions, Generator, GeneratorError};

/// A generator whose calls always fail with a network error.
#[derive(Debug, Default)]
pub struct OfflineGenerator {
    /// Whether the availability probe still reports success.
    passes_health_check: bool,
    calls: AtomicUsize,
}

impl OfflineGenerator {
    /// An offline generator that also fails its availability probe.
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator that passes the probe but then fails every call, as when
    /// the server drops between the probe and the request.
    pub fn passing_health_check() -> Self {
        Self {
            passes_health_check: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls attempted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for OfflineGenerator {
    async fn generate(
        &self,
        _messages: &[ChatMessage],
        _options: GenerationOptions,
    ) -> Result<Generation, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GeneratorError::Network(
            "connection refused".to_string(),
        ))
    }

    async fn is_available(&self) -> bool {
        self.passes_health_check
    }

    fn name(&self) -> &str {
        "OfflineGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline() {
        let generator = OfflineGenerator::new();
        assert!(!generator.is_available().await);

        let err = generator
            .generate(&[ChatMessage::user("hi")], GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_passing_health_check() {
        let generator = OfflineGenerator::passing_health_check();
        assert!(generator.is_available().await);
        assert!(generator
            .generate(&[], GenerationOptions::default())
            .await
            .is_err());
    }
}
