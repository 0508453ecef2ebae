//! Tutor chat endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mentor::{TutorAnswer, TutorQuestion};
use tracing::info;

use crate::error::Result;
use crate::state::AppState;

/// Answer a student's question from course materials.
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<TutorQuestion>, JsonRejection>,
) -> Result<Json<TutorAnswer>> {
    let Json(req) = payload?;
    info!(student_id = %req.student_id, course_id = ?req.course_id, "Tutor question");
    let answer = state.tutor.answer(&req).await?;
    Ok(Json(answer))
}
