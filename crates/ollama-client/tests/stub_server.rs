//! Integration tests for OllamaGenerator against a local stub server.
//!
//! Each test binds an axum app to an ephemeral port that mimics the parts of
//! the Ollama API the generator uses.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use ollama_client::{ChatMessage, GenerationOptions, Generator, GeneratorError, OllamaConfig, OllamaGenerator};
use serde_json::{json, Value};

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn generator_for(addr: SocketAddr, timeout_ms: u64) -> OllamaGenerator {
    let config = OllamaConfig::builder()
        .endpoint_url(format!("http://{}", addr))
        .model_name("stub-model")
        .request_timeout_ms(timeout_ms)
        .build()
        .unwrap();
    OllamaGenerator::new(config).unwrap()
}

/// Echoes the request back inside the reply so tests can inspect it.
async fn echo_chat(Json(body): Json<Value>) -> Json<Value> {
    let last = body["messages"]
        .as_array()
        .and_then(|m| m.last())
        .and_then(|m| m["content"].as_str())
        .unwrap_or_default()
        .to_string();

    Json(json!({
        "model": body["model"],
        "created_at": "2025-01-01T00:00:00Z",
        "message": {
            "role": "assistant",
            "content": format!(
                "echo:{} temp:{} max:{} stream:{}",
                last,
                body["options"]["temperature"],
                body["options"]["num_predict"],
                body["stream"]
            )
        },
        "done": true,
        "prompt_eval_count": 12,
        "eval_count": 30
    }))
}

async fn tags() -> Json<Value> {
    Json(json!({ "models": [{ "name": "stub-model" }] }))
}

#[tokio::test]
async fn test_generate_sends_options_and_reads_usage() {
    let app = Router::new()
        .route("/api/chat", post(echo_chat))
        .route("/api/tags", get(tags));
    let addr = spawn(app).await;
    let generator = generator_for(addr, 5_000);

    assert!(generator.is_available().await);

    let messages = vec![ChatMessage::system("be brief"), ChatMessage::user("hello")];
    let generation = generator
        .generate(&messages, GenerationOptions::new(0.5, 64))
        .await
        .unwrap();

    assert_eq!(generation.model, "stub-model");
    assert_eq!(generation.content, "echo:hello temp:0.5 max:64 stream:false");
    assert_eq!(generation.usage.prompt_tokens, 12);
    assert_eq!(generation.usage.completion_tokens, 30);
    assert_eq!(generation.usage.total(), 42);
}

#[tokio::test]
async fn test_api_error_status_is_reported() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "model 'stub-model' not found" })),
            )
        }),
    );
    let addr = spawn(app).await;
    let generator = generator_for(addr, 5_000);

    let err = generator
        .generate(&[ChatMessage::user("hi")], GenerationOptions::default())
        .await
        .unwrap_err();

    match err {
        GeneratorError::Api { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("not found"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let app = Router::new().route("/api/chat", post(|| async { "not json" }));
    let addr = spawn(app).await;
    let generator = generator_for(addr, 5_000);

    let err = generator
        .generate(&[ChatMessage::user("hi")], GenerationOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::InvalidResponse(_)));
    assert!(!err.is_unavailable());
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let app = Router::new().route(
        "/api/chat",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    );
    let addr = spawn(app).await;
    let generator = generator_for(addr, 100);

    let err = generator
        .generate(&[ChatMessage::user("hi")], GenerationOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, GeneratorError::Timeout(100)));
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_unreachable_server_is_unavailable() {
    // Reserve a port, then release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let generator = generator_for(addr, 1_000);
    assert!(!generator.is_available().await);

    let err = generator
        .generate(&[ChatMessage::user("hi")], GenerationOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_failing_health_endpoint() {
    let app = Router::new().route(
        "/api/tags",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let addr = spawn(app).await;
    let generator = generator_for(addr, 1_000);

    assert!(!generator.is_available().await);
}
