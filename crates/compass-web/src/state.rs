//! Application state shared across handlers.

use std::sync::Arc;

use database::Database;
use llm_core::Generator;
use mentor::{Advisor, Tutor};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Text generator, kept for health reporting.
    pub generator: Arc<dyn Generator>,
    /// Question answering over course materials.
    pub tutor: Tutor,
    /// Course recommendations.
    pub advisor: Advisor,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, generator: Arc<dyn Generator>, cost_per_1k_tokens: f64) -> Self {
        let tutor = Tutor::new(db.clone(), generator.clone())
            .with_cost_per_1k_tokens(cost_per_1k_tokens);
        let advisor = Advisor::new(db.clone(), generator.clone())
            .with_cost_per_1k_tokens(cost_per_1k_tokens);

        Self {
            db,
            generator,
            tutor,
            advisor,
        }
    }
}
