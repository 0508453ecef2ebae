//! Course material persistence.

use sqlx::SqlitePool;

use crate::models::{CourseMaterial, MaterialSummary};
use crate::Result;

/// Insert a material and return the stored row.
pub async fn insert_material(
    pool: &SqlitePool,
    course_id: i64,
    title: &str,
    filename: &str,
    content: &str,
) -> Result<CourseMaterial> {
    let material = sqlx::query_as::<_, CourseMaterial>(
        r#"
        INSERT INTO course_materials (course_id, title, filename, content)
        VALUES (?, ?, ?, ?)
        RETURNING id, course_id, title, filename, content, created_at
        "#,
    )
    .bind(course_id)
    .bind(title)
    .bind(filename)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(material)
}

/// All materials of one course, in upload order.
pub async fn list_for_course(pool: &SqlitePool, course_id: i64) -> Result<Vec<CourseMaterial>> {
    let rows = sqlx::query_as::<_, CourseMaterial>(
        r#"
        SELECT id, course_id, title, filename, content, created_at
        FROM course_materials
        WHERE course_id = ?
        ORDER BY id
        "#,
    )
    .bind(course_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Materials across all courses, in upload order, capped at `limit` rows.
pub async fn list_all(pool: &SqlitePool, limit: i64) -> Result<Vec<CourseMaterial>> {
    let rows = sqlx::query_as::<_, CourseMaterial>(
        r#"
        SELECT id, course_id, title, filename, content, created_at
        FROM course_materials
        ORDER BY id
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Material listing for a course, newest first, without bodies.
pub async fn list_summaries(pool: &SqlitePool, course_id: i64) -> Result<Vec<MaterialSummary>> {
    let rows = sqlx::query_as::<_, MaterialSummary>(
        r#"
        SELECT id, title, filename, created_at
        FROM course_materials
        WHERE course_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(course_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
