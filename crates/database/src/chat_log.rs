//! Tutor chat log persistence.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::models::{ChatLog, SourceCitation};
use crate::Result;

/// A chat log row joined with the asking student, for activity feeds.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct RecentChat {
    pub id: i64,
    pub question: String,
    pub confidence: f64,
    pub created_at: String,
    pub student_id: String,
    pub student_name: String,
}

/// Append a chat log entry and return its ID.
pub async fn insert_chat_log(
    pool: &SqlitePool,
    student_id: i64,
    course_id: Option<i64>,
    question: &str,
    answer: &str,
    sources: &[SourceCitation],
    confidence: f64,
) -> Result<i64> {
    let sources = serde_json::to_string(sources)?;

    let result = sqlx::query(
        r#"
        INSERT INTO chat_logs (student_id, course_id, question, answer, sources, confidence)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(student_id)
    .bind(course_id)
    .bind(question)
    .bind(answer)
    .bind(sources)
    .bind(confidence)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Chat history of one student, newest first.
pub async fn list_for_student(
    pool: &SqlitePool,
    student_id: i64,
    limit: i64,
) -> Result<Vec<ChatLog>> {
    let rows = sqlx::query_as::<_, ChatLog>(
        r#"
        SELECT id, student_id, course_id, question, answer, sources, confidence, created_at
        FROM chat_logs
        WHERE student_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(student_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Latest chats across all students.
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<RecentChat>> {
    let rows = sqlx::query_as::<_, RecentChat>(
        r#"
        SELECT c.id, c.question, c.confidence, c.created_at,
               s.student_id AS student_id, s.name AS student_name
        FROM chat_logs c
        JOIN students s ON s.id = c.student_id
        ORDER BY c.created_at DESC, c.id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
