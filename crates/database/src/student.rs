//! Student operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{NewStudent, Student};

/// Create a student, or update every field of the existing row with the same
/// student ID.
pub async fn upsert_student(pool: &SqlitePool, student: &NewStudent) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO students (
            student_id, name, email, department, grade,
            creativity, collaboration, problem_solving
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(student_id) DO UPDATE SET
            name = excluded.name,
            email = excluded.email,
            department = excluded.department,
            grade = excluded.grade,
            creativity = excluded.creativity,
            collaboration = excluded.collaboration,
            problem_solving = excluded.problem_solving,
            updated_at = datetime('now')
        "#,
    )
    .bind(&student.student_id)
    .bind(&student.name)
    .bind(&student.email)
    .bind(&student.department)
    .bind(student.grade)
    .bind(student.competencies.creativity)
    .bind(student.competencies.collaboration)
    .bind(student.competencies.problem_solving)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a student by their student ID.
pub async fn get_student(pool: &SqlitePool, student_id: &str) -> Result<Student> {
    sqlx::query_as::<_, Student>(
        r#"
        SELECT id, student_id, name, email, department, grade,
               creativity, collaboration, problem_solving, created_at
        FROM students
        WHERE student_id = ?
        "#,
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Student",
        id: student_id.to_string(),
    })
}

/// List all students ordered by student ID.
pub async fn list_students(pool: &SqlitePool) -> Result<Vec<Student>> {
    let students = sqlx::query_as::<_, Student>(
        r#"
        SELECT id, student_id, name, email, department, grade,
               creativity, collaboration, problem_solving, created_at
        FROM students
        ORDER BY student_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(students)
}

/// Count total students.
pub async fn count_students(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM students
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Students ranked by tutor activity: `(student_id, name, chats, recommendations)`.
pub async fn list_most_active(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<(String, String, i64, i64)>> {
    let rows = sqlx::query_as::<_, (String, String, i64, i64)>(
        r#"
        SELECT s.student_id,
               s.name,
               (SELECT COUNT(*) FROM chat_logs c WHERE c.student_id = s.id) AS chat_count,
               (SELECT COUNT(*) FROM recommendations r WHERE r.student_id = s.id) AS rec_count
        FROM students s
        ORDER BY chat_count DESC, s.student_id
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
