//! Course material upload and listing.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use database::{course, material, MaterialSummary};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, WebError};
use crate::state::AppState;

/// A text material to attach to a course.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMaterialRequest {
    #[serde(default, deserialize_with = "mentor::tutor::lenient_id")]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Defaults to `{title}.txt`.
    pub filename: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMaterial {
    pub id: i64,
    pub title: String,
    pub filename: String,
    pub course_id: i64,
    /// Body length in characters.
    pub content_length: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMaterialResponse {
    pub success: bool,
    pub material: StoredMaterial,
}

/// Store a new material for a course.
pub async fn create_material(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewMaterialRequest>, JsonRejection>,
) -> Result<Json<CreateMaterialResponse>> {
    let Json(req) = payload?;
    let title = req.title.trim();
    let course_id = match req.course_id {
        Some(id) if !title.is_empty() => id,
        _ => {
            return Err(WebError::BadRequest(
                "Course ID and title are required".to_string(),
            ))
        }
    };
    if req.content.trim().is_empty() {
        return Err(WebError::BadRequest("Content is required".to_string()));
    }

    if let Err(e) = course::get_course(state.db.pool(), course_id).await {
        if e.is_not_found() {
            return Err(WebError::NotFound("Course not found".to_string()));
        }
        return Err(e.into());
    }

    let filename = match req.filename.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("{}.txt", title),
    };

    let stored =
        material::insert_material(state.db.pool(), course_id, title, &filename, &req.content)
            .await?;
    info!(id = stored.id, course_id, title = %stored.title, "Material stored");

    Ok(Json(CreateMaterialResponse {
        success: true,
        material: StoredMaterial {
            id: stored.id,
            content_length: stored.content.chars().count(),
            title: stored.title,
            filename: stored.filename,
            course_id: stored.course_id,
        },
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsQuery {
    pub course_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MaterialsResponse {
    pub materials: Vec<MaterialSummary>,
}

/// List the materials of one course, newest first.
pub async fn list_materials(
    State(state): State<AppState>,
    Query(query): Query<MaterialsQuery>,
) -> Result<Json<MaterialsResponse>> {
    let course_id = query
        .course_id
        .as_deref()
        .and_then(|id| id.trim().parse::<i64>().ok())
        .ok_or_else(|| WebError::BadRequest("Course ID is required".to_string()))?;

    let materials = material::list_summaries(state.db.pool(), course_id).await?;
    Ok(Json(MaterialsResponse { materials }))
}
