//! Ollama API request and response types.

use llm_core::ChatMessage;
use serde::{Deserialize, Serialize};

/// Chat request to `/api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    /// Model to use
    pub model: &'a str,
    /// Messages in the conversation
    pub messages: &'a [ChatMessage],
    /// Always false; we read a single JSON body.
    pub stream: bool,
    /// Sampling options
    pub options: ChatOptions,
}

/// Model options for a chat request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatOptions {
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum tokens to generate
    pub num_predict: u32,
}

/// Non-streaming chat response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Model used
    pub model: String,
    /// The generated message
    pub message: ResponseMessage,
    /// Prompt tokens evaluated
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    /// Tokens generated
    #[serde(default)]
    pub eval_count: Option<u32>,
}

/// Response message.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: String,
}

/// API error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hi")];
        let request = ChatRequest {
            model: "exaone3.5:7.8b",
            messages: &messages,
            stream: false,
            options: ChatOptions {
                temperature: 0.3,
                num_predict: 800,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "exaone3.5:7.8b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["options"]["num_predict"], 800);
    }

    #[test]
    fn test_response_without_counts() {
        let body = r#"{
            "model": "exaone3.5:7.8b",
            "created_at": "2025-01-01T00:00:00Z",
            "message": {"role": "assistant", "content": "Hello"},
            "done": true
        }"#;

        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.message.content, "Hello");
        assert!(response.prompt_eval_count.is_none());
        assert!(response.eval_count.is_none());
    }

    #[test]
    fn test_response_message_without_role() {
        let body = r#"{"model": "m", "message": {"content": "Hi"}, "eval_count": 3}"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.message.content, "Hi");
        assert_eq!(response.eval_count, Some(3));
    }
}
