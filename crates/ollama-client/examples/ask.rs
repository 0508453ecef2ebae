//! Ask the configured Ollama model a single question.
//!
//! Run with: cargo run -p ollama-client --example ask
//! Or with a custom question: cargo run -p ollama-client --example ask -- "Your question here"
//!
//! Reads OLLAMA_URL, OLLAMA_MODEL and OLLAMA_TIMEOUT_MS from the environment or .env.

use ollama_client::{ChatMessage, GenerationOptions, Generator, OllamaGenerator};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let question = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Explain recursion in two sentences.".to_string()
    };

    let generator = OllamaGenerator::from_env()?;
    println!("Endpoint: {}", generator.config().endpoint_url);
    println!("Model: {}", generator.config().model_name);

    if !generator.is_available().await {
        println!("Ollama server is not reachable.");
        return Ok(());
    }

    let messages = vec![
        ChatMessage::system("You are a concise university tutor."),
        ChatMessage::user(question),
    ];
    let reply = generator
        .generate(&messages, GenerationOptions::new(0.3, 400))
        .await?;

    println!("=== Response ===");
    println!("{}", reply.content);
    println!("================");
    println!(
        "Tokens - prompt: {}, completion: {}",
        reply.usage.prompt_tokens, reply.usage.completion_tokens
    );

    Ok(())
}
