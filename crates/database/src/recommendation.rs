//! Recommendation persistence.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::models::{NewRecommendation, Recommendation, RecommendationStatus};
use crate::Result;

/// A recommendation joined with its student and course, for activity feeds.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct RecentRecommendation {
    pub id: i64,
    pub score: f64,
    pub status: RecommendationStatus,
    pub created_at: String,
    pub student_id: String,
    pub student_name: String,
    pub course_code: String,
    pub course_name: String,
}

/// Write the rows of one recommendation run, all with status `pending`.
///
/// Rows are inserted in a single transaction so a run is stored whole or not
/// at all.
pub async fn insert_run(pool: &SqlitePool, rows: &[NewRecommendation]) -> Result<()> {
    let mut tx = pool.begin().await?;

    for row in rows {
        sqlx::query(
            r#"
            INSERT INTO recommendations (student_id, course_id, rank, score, reason, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(row.student_id)
        .bind(row.course_id)
        .bind(row.rank)
        .bind(row.score)
        .bind(&row.reason)
        .bind(RecommendationStatus::Pending)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Recommendations for one student, most recently written first.
pub async fn list_for_student(
    pool: &SqlitePool,
    student_id: i64,
    limit: i64,
) -> Result<Vec<Recommendation>> {
    let rows = sqlx::query_as::<_, Recommendation>(
        r#"
        SELECT id, student_id, course_id, rank, score, reason, status, created_at
        FROM recommendations
        WHERE student_id = ?
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(student_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Latest recommendations across all students.
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<RecentRecommendation>> {
    let rows = sqlx::query_as::<_, RecentRecommendation>(
        r#"
        SELECT r.id, r.score, r.status, r.created_at,
               s.student_id AS student_id, s.name AS student_name,
               c.code AS course_code, c.name AS course_name
        FROM recommendations r
        JOIN students s ON s.id = r.student_id
        JOIN courses c ON c.id = r.course_id
        ORDER BY r.created_at DESC, r.id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
