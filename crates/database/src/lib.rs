//! SQLite persistence layer for COMPASS.
//!
//! This crate provides async database operations for students, courses,
//! course materials, tutor chat logs, course recommendations and daily
//! generator usage, using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, models::{CompetencyVector, NewStudent}, student};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:compass.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create or update a student
//!     let new = NewStudent {
//!         student_id: "2024001".to_string(),
//!         name: "Kim Minji".to_string(),
//!         email: None,
//!         department: Some("Computer Science".to_string()),
//!         grade: Some(2),
//!         competencies: CompetencyVector::new(75.0, 82.0, 68.0),
//!     };
//!     student::upsert_student(db.pool(), &new).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod chat_log;
pub mod course;
pub mod error;
pub mod material;
pub mod models;
pub mod recommendation;
pub mod seed;
pub mod student;
pub mod usage_stats;
pub mod validation;

pub use error::{DatabaseError, Result};
pub use models::{
    ChatLog, CompetencyVector, Course, CourseMaterial, MaterialSummary, NewCourse,
    NewRecommendation, NewStudent, Recommendation, RecommendationStatus, SourceCitation,
    Student, UsageStats, UsageTotals,
};
pub use usage_stats::UsageFeature;
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
///
/// Cheap to clone; handlers receive it by injection rather than through a
/// global.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/compass.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing; use a single connection)
    /// let db = database::Database::connect_with_pool_size("sqlite::memory:", 1).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Open a migrated single-connection in-memory database.
    pub async fn in_memory() -> Result<Self> {
        let db = Self::connect_with_pool_size("sqlite::memory:", 1).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
