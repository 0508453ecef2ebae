//! Bulk student upload.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use database::{student, validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{Result, WebError};
use crate::state::AppState;

/// Per-batch counts.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

/// Upload result.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// True when at least one row was stored.
    pub success: bool,
    pub message: String,
    pub stats: UploadStats,
    /// One line per failed row, `Row {n}: ...` with 1-based `n`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Validate and upsert every row of `{"students": [...]}`.
///
/// Rows are independent: a bad row is reported and the rest still go in.
pub async fn upload_students(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<UploadResponse>> {
    let Json(body) = payload?;
    let rows = body
        .get("students")
        .and_then(Value::as_array)
        .ok_or_else(|| WebError::BadRequest("Invalid data format".to_string()))?;

    let mut success = 0;
    let mut errors = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let new = match validation::validate_student_row(row) {
            Ok(new) => new,
            Err(problems) => {
                let detail = problems
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                errors.push(format!("Row {}: {}", i + 1, detail));
                continue;
            }
        };

        match student::upsert_student(state.db.pool(), &new).await {
            Ok(()) => success += 1,
            Err(e) => {
                warn!("Failed to store student {}: {}", new.student_id, e);
                errors.push(format!("Row {}: {}", i + 1, e));
            }
        }
    }

    let failed = errors.len();
    let message = if success > 0 {
        let mut message = format!("{} students uploaded successfully.", success);
        if failed > 0 {
            message.push_str(&format!(" ({} failed)", failed));
        }
        message
    } else {
        "Upload failed.".to_string()
    };
    info!(total = rows.len(), success, failed, "Student upload processed");

    Ok(Json(UploadResponse {
        success: success > 0,
        message,
        stats: UploadStats {
            total: rows.len(),
            success,
            failed,
        },
        errors: (!errors.is_empty()).then_some(errors),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use database::student;
    use mock_llm::OfflineGenerator;
    use serde_json::json;

    use super::*;
    use crate::routes::test_support::{seeded_db, server};

    #[tokio::test]
    async fn test_upload_reports_each_row() {
        let db = seeded_db().await;
        let app = server(db.clone(), Arc::new(OfflineGenerator::new()));

        let response = app
            .post("/api/upload/students")
            .json(&json!({
                "students": [
                    {
                        "studentId": "2024001", "name": "Kim Minji", "email": "",
                        "department": "Computer Science", "grade": "2",
                        "creativity": "75", "collaboration": "82", "problemSolving": "68"
                    },
                    {
                        "studentId": "2024002", "name": "",
                        "creativity": 150, "collaboration": 50, "problemSolving": 50
                    },
                    {
                        "studentId": "2024003", "name": "Lee Jun",
                        "creativity": 60, "collaboration": 70, "problemSolving": 80
                    }
                ]
            }))
            .await;
        response.assert_status_ok();

        let body: UploadResponse = response.json();
        assert!(body.success);
        assert_eq!(body.stats.total, 3);
        assert_eq!(body.stats.success, 2);
        assert_eq!(body.stats.failed, 1);
        assert_eq!(body.message, "2 students uploaded successfully. (1 failed)");

        let errors = body.errors.unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Row 2: "));
        assert!(errors[0].contains("name is required"));
        assert!(errors[0].contains("creativity"));

        let stored = student::get_student(db.pool(), "2024001").await.unwrap();
        assert_eq!(stored.email, None);
        assert_eq!(stored.grade, Some(2));
        assert_eq!(stored.competencies.problem_solving, 68.0);
    }

    #[tokio::test]
    async fn test_upload_is_an_upsert() {
        let db = seeded_db().await;
        let app = server(db.clone(), Arc::new(OfflineGenerator::new()));

        for name in ["Old Name", "New Name"] {
            app.post("/api/upload/students")
                .json(&json!({
                    "students": [{
                        "studentId": "2024001", "name": name,
                        "creativity": 1, "collaboration": 2, "problemSolving": 3
                    }]
                }))
                .await
                .assert_status_ok();
        }

        assert_eq!(student::count_students(db.pool()).await.unwrap(), 1);
        let stored = student::get_student(db.pool(), "2024001").await.unwrap();
        assert_eq!(stored.name, "New Name");
    }

    #[tokio::test]
    async fn test_upload_all_rows_failing() {
        let app = server(seeded_db().await, Arc::new(OfflineGenerator::new()));

        let response = app
            .post("/api/upload/students")
            .json(&json!({ "students": [{ "name": "No ID" }] }))
            .await;
        response.assert_status_ok();
        let body: UploadResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.message, "Upload failed.");
        assert_eq!(body.stats.failed, 1);
    }

    #[tokio::test]
    async fn test_upload_requires_array() {
        let app = server(seeded_db().await, Arc::new(OfflineGenerator::new()));

        app.post("/api/upload/students")
            .json(&json!({ "students": "nope" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        app.post("/api/upload/students")
            .json(&json!({}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        let response = app.post("/api/upload/students").text("name,email").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<serde_json::Value>()["error"].is_string());
    }
}
