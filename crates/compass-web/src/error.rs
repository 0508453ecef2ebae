//! Error types for the web API.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mentor::MentorError;
use thiserror::Error;

/// Answer text sent with 503 responses so chat clients can show it directly.
pub const UNAVAILABLE_ANSWER: &str =
    "The AI service cannot be reached right now. Please contact an administrator.";

/// Errors that can occur while handling an API request.
#[derive(Debug, Error)]
pub enum WebError {
    /// Missing or malformed input.
    #[error("{0}")]
    BadRequest(String),

    /// Unknown student, course or other resource.
    #[error("{0}")]
    NotFound(String),

    /// The text generator cannot be used.
    #[error("{0}")]
    Unavailable(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),
}

impl From<MentorError> for WebError {
    fn from(err: MentorError) -> Self {
        match err {
            MentorError::Validation(msg) => WebError::BadRequest(msg),
            MentorError::StudentNotFound(_) => WebError::NotFound("Student not found".to_string()),
            MentorError::CourseNotFound(_) => WebError::NotFound("Course not found".to_string()),
            MentorError::NoCourses => WebError::NotFound("No courses available".to_string()),
            MentorError::Unavailable(msg) => WebError::Unavailable(msg),
            MentorError::Database(err) => WebError::Database(err),
        }
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        WebError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let body = match &self {
            WebError::BadRequest(msg) | WebError::NotFound(msg) => {
                serde_json::json!({ "error": msg })
            }
            WebError::Unavailable(msg) => {
                tracing::warn!("Generator unavailable: {}", msg);
                serde_json::json!({
                    "error": "AI service is not available",
                    "answer": UNAVAILABLE_ANSWER,
                })
            }
            WebError::Database(err) => {
                tracing::error!("Database error: {}", err);
                serde_json::json!({ "error": "Internal server error" })
            }
        };

        (self.status(), Json(body)).into_response()
    }
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            WebError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, WebError>;
