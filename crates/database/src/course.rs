//! Course operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Course, NewCourse};

/// Create a course or overwrite the course with the same code.
pub async fn upsert_course(pool: &SqlitePool, course: &NewCourse) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO courses (
            code, name, description, credits, department,
            creativity, collaboration, problem_solving
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(code) DO UPDATE SET
            name = excluded.name,
            description = excluded.description,
            credits = excluded.credits,
            department = excluded.department,
            creativity = excluded.creativity,
            collaboration = excluded.collaboration,
            problem_solving = excluded.problem_solving
        "#,
    )
    .bind(course.code)
    .bind(course.name)
    .bind(course.description)
    .bind(course.credits)
    .bind(course.department)
    .bind(course.weights.creativity)
    .bind(course.weights.collaboration)
    .bind(course.weights.problem_solving)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a course by row ID.
pub async fn get_course(pool: &SqlitePool, id: i64) -> Result<Course> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT id, code, name, description, credits, department,
               creativity, collaboration, problem_solving
        FROM courses
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Course",
        id: id.to_string(),
    })
}

/// Get a course by code.
pub async fn get_course_by_code(pool: &SqlitePool, code: &str) -> Result<Course> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT id, code, name, description, credits, department,
               creativity, collaboration, problem_solving
        FROM courses
        WHERE code = ?
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Course",
        id: code.to_string(),
    })
}

/// List all courses in insertion order.
///
/// The ranker breaks ties by this order, so it must stay stable.
pub async fn list_courses(pool: &SqlitePool) -> Result<Vec<Course>> {
    let courses = sqlx::query_as::<_, Course>(
        r#"
        SELECT id, code, name, description, credits, department,
               creativity, collaboration, problem_solving
        FROM courses
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(courses)
}

/// List all courses ordered by code.
pub async fn list_courses_by_code(pool: &SqlitePool) -> Result<Vec<Course>> {
    let courses = sqlx::query_as::<_, Course>(
        r#"
        SELECT id, code, name, description, credits, department,
               creativity, collaboration, problem_solving
        FROM courses
        ORDER BY code
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(courses)
}

/// Count total courses.
pub async fn count_courses(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM courses
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Courses that have at least one material, ranked by how often they were
/// recommended: `(code, name, materials, recommendations)`.
pub async fn list_courses_with_activity(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<(String, String, i64, i64)>> {
    let rows = sqlx::query_as::<_, (String, String, i64, i64)>(
        r#"
        SELECT c.code,
               c.name,
               (SELECT COUNT(*) FROM course_materials m WHERE m.course_id = c.id) AS material_count,
               (SELECT COUNT(*) FROM recommendations r WHERE r.course_id = c.id) AS rec_count
        FROM courses c
        WHERE EXISTS (SELECT 1 FROM course_materials m WHERE m.course_id = c.id)
        ORDER BY rec_count DESC, c.code
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
