//! Route handlers for the COMPASS API.

pub mod analytics;
pub mod chat;
pub mod courses;
pub mod health;
pub mod materials;
pub mod recommend;
pub mod students;
pub mod upload;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Student-facing endpoints
        .route("/api/chat", post(chat::chat))
        .route("/api/recommend", post(recommend::recommend))
        // Admin endpoints
        .route("/api/upload/students", post(upload::upload_students))
        .route(
            "/api/materials",
            get(materials::list_materials).post(materials::create_material),
        )
        .route("/api/courses", get(courses::list_courses))
        .route("/api/students", get(students::list_students))
        .route("/api/students/:student_id", get(students::get_student))
        .route("/api/analytics", get(analytics::analytics))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum_test::TestServer;
    use database::{seed, student, CompetencyVector, Database, NewStudent};
    use llm_core::Generator;

    use super::router;
    use crate::state::AppState;

    /// In-memory database with the course catalogue seeded.
    pub async fn seeded_db() -> Database {
        let db = Database::in_memory().await.unwrap();
        seed::seed_courses(db.pool()).await.unwrap();
        db
    }

    pub async fn add_student(db: &Database, student_id: &str, name: &str) {
        student::upsert_student(
            db.pool(),
            &NewStudent {
                student_id: student_id.to_string(),
                name: name.to_string(),
                email: None,
                department: Some("Computer Science".to_string()),
                grade: Some(2),
                competencies: CompetencyVector::new(75.0, 82.0, 68.0),
            },
        )
        .await
        .unwrap();
    }

    pub fn server(db: Database, generator: Arc<dyn Generator>) -> TestServer {
        let state = AppState::new(db, generator, 0.0);
        TestServer::new(router().with_state(state)).unwrap()
    }
}
