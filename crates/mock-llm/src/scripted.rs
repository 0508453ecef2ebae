//! Scripted generator - replies with fixed text.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use llm_core::{ChatMessage, Generation, GenerationOptions, Generator, GeneratorError, TokenUsage};

/// A generator that always returns the same reply.
///
/// Every call is counted and the messages and options of the latest call are
/// kept for inspection.
#[derive(Debug)]
pub struct ScriptedGenerator {
    reply: String,
    usage: TokenUsage,
    calls: AtomicUsize,
    last_request: Mutex<Option<(Vec<ChatMessage>, GenerationOptions)>>,
}

impl ScriptedGenerator {
    /// Create a generator replying with `reply` and reporting 100 prompt and
    /// 50 completion tokens.
    pub fn new(reply: impl Into<String>) -> Self {
        Self::with_usage(reply, TokenUsage::new(100, 50))
    }

    /// Create a generator with explicit token usage.
    pub fn with_usage(reply: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            reply: reply.into(),
            usage,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages sent with the latest call.
    pub fn last_messages(&self) -> Option<Vec<ChatMessage>> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|(messages, _)| messages.clone()))
    }

    /// Options sent with the latest call.
    pub fn last_options(&self) -> Option<GenerationOptions> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(|(_, options)| *options))
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        options: GenerationOptions,
    ) -> Result<Generation, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.last_request.lock() {
            *guard = Some((messages.to_vec(), options));
        }

        Ok(Generation::new(self.reply.clone(), "scripted", self.usage))
    }

    fn name(&self) -> &str {
        "ScriptedGenerator"
    }
}
