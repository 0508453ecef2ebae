//! Built-in course catalogue.

use sqlx::SqlitePool;

use crate::course::upsert_course;
use crate::models::{CompetencyVector, NewCourse};
use crate::Result;

/// The default course catalogue with competency weights.
pub fn default_courses() -> Vec<NewCourse> {
    vec![
        NewCourse {
            code: "CS101",
            name: "Introduction to Programming",
            description: "Programming fundamentals with Python",
            credits: 3,
            department: "Computer Science",
            weights: CompetencyVector::new(0.6, 0.3, 0.9),
        },
        NewCourse {
            code: "CS201",
            name: "Data Structures",
            description: "Arrays, lists, trees, graphs and other core data structures",
            credits: 3,
            department: "Computer Science",
            weights: CompetencyVector::new(0.5, 0.2, 0.95),
        },
        NewCourse {
            code: "CS301",
            name: "Database Systems",
            description: "Design and management of SQL and NoSQL databases",
            credits: 3,
            department: "Computer Science",
            weights: CompetencyVector::new(0.4, 0.5, 0.8),
        },
        NewCourse {
            code: "DES101",
            name: "Creative Thinking and Design",
            description: "Design thinking and creative problem solving",
            credits: 3,
            department: "Design",
            weights: CompetencyVector::new(0.95, 0.8, 0.7),
        },
        NewCourse {
            code: "DES202",
            name: "UI/UX Design",
            description: "User-centred interface design",
            credits: 3,
            department: "Design",
            weights: CompetencyVector::new(0.9, 0.7, 0.6),
        },
        NewCourse {
            code: "BUS101",
            name: "Principles of Management",
            description: "Core concepts and principles of management",
            credits: 3,
            department: "Business",
            weights: CompetencyVector::new(0.5, 0.8, 0.6),
        },
        NewCourse {
            code: "BUS202",
            name: "Project Management",
            description: "Planning and running team projects",
            credits: 3,
            department: "Business",
            weights: CompetencyVector::new(0.6, 0.95, 0.8),
        },
        NewCourse {
            code: "ENG101",
            name: "Introduction to Engineering Design",
            description: "Foundations of mechanical and electrical engineering",
            credits: 3,
            department: "Mechanical Engineering",
            weights: CompetencyVector::new(0.7, 0.6, 0.9),
        },
        NewCourse {
            code: "AI301",
            name: "Introduction to Artificial Intelligence",
            description: "Foundations of machine learning and deep learning",
            credits: 3,
            department: "Computer Science",
            weights: CompetencyVector::new(0.8, 0.5, 0.9),
        },
        NewCourse {
            code: "TEAM101",
            name: "Teamwork and Leadership",
            description: "Effective collaboration and leadership development",
            credits: 2,
            department: "General Education",
            weights: CompetencyVector::new(0.5, 0.95, 0.6),
        },
    ]
}

/// Upsert the default catalogue. Safe to run on every start.
pub async fn seed_courses(pool: &SqlitePool) -> Result<usize> {
    let courses = default_courses();
    for course in &courses {
        upsert_course(pool, course).await?;
        tracing::debug!(code = course.code, "Seeded course");
    }

    tracing::info!(count = courses.len(), "Course catalogue seeded");
    Ok(courses.len())
}
