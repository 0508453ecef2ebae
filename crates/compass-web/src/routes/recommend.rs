//! Course recommendation endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mentor::RecommendationReport;
use serde::Deserialize;
use tracing::info;

use crate::error::Result;
use crate::state::AppState;

/// Request for a recommendation run.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[serde(default)]
    pub student_id: String,
}

/// Rank courses for a student and store the run.
pub async fn recommend(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendationReport>> {
    let Json(req) = payload?;
    info!(student_id = %req.student_id, "Recommendation requested");
    let report = state.advisor.recommend(&req.student_id).await?;
    Ok(Json(report))
}
