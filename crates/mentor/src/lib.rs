//! Tutoring and course-advising services for COMPASS.
//!
//! Two pure computations sit at the core:
//! - [`scorer`] ranks course materials by keyword occurrences for a question
//! - [`ranker`] ranks courses by the weighted sum of a student's competencies
//!
//! [`Tutor`] and [`Advisor`] wrap them with a text generator, persistence and
//! usage recording.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use database::Database;
//! use mentor::{Advisor, Tutor, TutorQuestion};
//! use mock_llm::ScriptedGenerator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:compass.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let generator = Arc::new(ScriptedGenerator::new("Recursion is ..."));
//!     let tutor = Tutor::new(db.clone(), generator.clone());
//!     let reply = tutor
//!         .answer(&TutorQuestion {
//!             student_id: "2024001".to_string(),
//!             course_id: None,
//!             question: "What is recursion?".to_string(),
//!         })
//!         .await?;
//!     println!("{} (confidence {})", reply.answer, reply.confidence);
//!
//!     let report = Advisor::new(db, generator).recommend("2024001").await?;
//!     println!("{} recommendations", report.recommendations.len());
//!     Ok(())
//! }
//! ```

pub mod advisor;
pub mod error;
pub mod prompt;
pub mod ranker;
pub mod scorer;
pub mod tutor;
pub mod usage;

pub use advisor::{
    Advisor, CourseRecommendation, CourseSummary, RecommendationReport, StudentSummary,
    DEGRADED_NOTE,
};
pub use error::{MentorError, Result};
pub use ranker::{RankedCourse, TOP_COURSES};
pub use scorer::{Document, ScoredDocument, EVIDENCE_LIMIT};
pub use tutor::{SourceExcerpt, Tutor, TutorAnswer, TutorQuestion};
