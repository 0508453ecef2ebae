//! Generator error types.

use thiserror::Error;

/// Errors that can occur while talking to a text generator.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The service could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded its time budget.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The service answered with a body we could not decode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl GeneratorError {
    /// Whether the error means the service is unavailable rather than
    /// misbehaving.
    ///
    /// Network failures, timeouts, and 5xx statuses count as unavailable.
    pub fn is_unavailable(&self) -> bool {
        match self {
            GeneratorError::Network(_) | GeneratorError::Timeout(_) => true,
            GeneratorError::Api { status, .. } => *status >= 500,
            GeneratorError::Configuration(_) | GeneratorError::InvalidResponse(_) => false,
        }
    }
}
