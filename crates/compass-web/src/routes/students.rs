//! Student listing and detail.

use axum::extract::{Path, State};
use axum::Json;
use database::{student, Student};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WebError};
use crate::state::AppState;

/// Student row without competencies.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListing {
    pub id: i64,
    pub student_id: String,
    pub name: String,
    pub department: Option<String>,
    pub grade: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudentsResponse {
    pub students: Vec<StudentListing>,
}

/// All students ordered by student ID.
pub async fn list_students(State(state): State<AppState>) -> Result<Json<StudentsResponse>> {
    let students = student::list_students(state.db.pool())
        .await?
        .into_iter()
        .map(|s| StudentListing {
            id: s.id,
            student_id: s.student_id,
            name: s.name,
            department: s.department,
            grade: s.grade,
        })
        .collect();

    Ok(Json(StudentsResponse { students }))
}

/// One student with competencies.
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Student>> {
    match student::get_student(state.db.pool(), &student_id).await {
        Ok(student) => Ok(Json(student)),
        Err(e) if e.is_not_found() => Err(WebError::NotFound("Student not found".to_string())),
        Err(e) => Err(e.into()),
    }
}
