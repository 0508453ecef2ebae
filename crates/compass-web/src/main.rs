//! COMPASS web server.
//!
//! Serves the tutor chat and course recommendation endpoints plus the
//! administrative JSON API for student upload, course materials and usage
//! analytics.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use database::{seed, Database};
use llm_core::Generator;
use ollama_client::OllamaGenerator;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting COMPASS server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;
    if config.seed_courses {
        seed::seed_courses(db.pool()).await?;
    }

    // Text generator
    let generator = OllamaGenerator::from_env()?;
    info!(
        endpoint = %generator.config().endpoint_url,
        model = %generator.config().model_name,
        "Using Ollama generator"
    );
    if !generator.is_available().await {
        warn!("Ollama is not reachable yet; recommendations will use default reasons");
    }

    // Build application state
    let state = AppState::new(db, Arc::new(generator), config.cost_per_1k_tokens);

    // Build router
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "COMPASS server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
