//! Course catalogue listing.

use axum::extract::State;
use axum::Json;
use database::{course, Course};

use crate::error::Result;
use crate::state::AppState;

/// All courses with their competency weights, ordered by code.
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>> {
    let courses = course::list_courses_by_code(state.db.pool()).await?;
    Ok(Json(courses))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use database::seed;
    use mock_llm::OfflineGenerator;
    use serde_json::Value;

    use crate::routes::test_support::{seeded_db, server};

    #[tokio::test]
    async fn test_courses_sorted_by_code() {
        let app = server(seeded_db().await, Arc::new(OfflineGenerator::new()));

        let response = app.get("/api/courses").await;
        response.assert_status_ok();

        let body: Vec<Value> = response.json();
        assert_eq!(body.len(), seed::default_courses().len());
        let codes: Vec<_> = body.iter().map(|c| c["code"].as_str().unwrap()).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);

        let cs101 = body.iter().find(|c| c["code"] == "CS101").unwrap();
        assert_eq!(cs101["competencyWeights"]["problemSolving"], 0.9);
    }
}
