//! Service error types.

use database::DatabaseError;
use thiserror::Error;

/// Errors returned by the tutor and advisor services.
#[derive(Debug, Error)]
pub enum MentorError {
    /// Missing or malformed request input.
    #[error("{0}")]
    Validation(String),

    /// No student with this student ID.
    #[error("Student not found: {0}")]
    StudentNotFound(String),

    /// No course with this ID.
    #[error("Course not found: {0}")]
    CourseNotFound(i64),

    /// The course catalogue is empty.
    #[error("No courses available")]
    NoCourses,

    /// The text generator cannot be used right now.
    #[error("Generator unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl MentorError {
    /// Whether the error is the caller's fault rather than a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MentorError::Validation(_)
                | MentorError::StudentNotFound(_)
                | MentorError::CourseNotFound(_)
                | MentorError::NoCourses
        )
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, MentorError>;
