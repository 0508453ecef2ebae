//! Database models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Three-dimensional competency scores or weights.
///
/// For students each value is a score in `[0, 100]`. For courses each value
/// is a non-negative weight; course weights are not normalized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompetencyVector {
    pub creativity: f64,
    pub collaboration: f64,
    pub problem_solving: f64,
}

impl CompetencyVector {
    pub fn new(creativity: f64, collaboration: f64, problem_solving: f64) -> Self {
        Self {
            creativity,
            collaboration,
            problem_solving,
        }
    }
}

/// A student, keyed by their institutional student ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Surrogate row ID.
    pub id: i64,
    /// Institutional student ID (unique business key, e.g. "2024001").
    pub student_id: String,
    /// Display name
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    /// Academic year, 1 through 4.
    pub grade: Option<i64>,
    #[sqlx(flatten)]
    pub competencies: CompetencyVector,
    pub created_at: String,
}

/// Input for creating or updating a student by student ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub student_id: String,
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub grade: Option<i64>,
    pub competencies: CompetencyVector,
}

/// A course with its competency weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    /// Course code (e.g., "CS101")
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub credits: Option<i64>,
    pub department: Option<String>,
    #[sqlx(flatten)]
    #[serde(rename = "competencyWeights")]
    pub weights: CompetencyVector,
}

/// Input for seeding a course.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub credits: i64,
    pub department: &'static str,
    pub weights: CompetencyVector,
}

/// Teaching material attached to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CourseMaterial {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub filename: String,
    /// Full text body.
    pub content: String,
    pub created_at: String,
}

/// Material listing row without the text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    pub id: i64,
    pub title: String,
    pub filename: String,
    pub created_at: String,
}

/// A material cited as evidence for an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub title: String,
    pub score: u64,
}

/// One tutor question/answer exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChatLog {
    pub id: i64,
    /// Student row ID.
    pub student_id: i64,
    /// Course row ID the question was scoped to, if any.
    pub course_id: Option<i64>,
    pub question: String,
    pub answer: String,
    /// JSON-encoded list of [`SourceCitation`].
    pub sources: String,
    pub confidence: f64,
    pub created_at: String,
}

impl ChatLog {
    /// Decode the stored source citations.
    pub fn citations(&self) -> Result<Vec<SourceCitation>, serde_json::Error> {
        serde_json::from_str(&self.sources)
    }
}

/// Review state of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RecommendationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RecommendationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationStatus::Pending => "pending",
            RecommendationStatus::Approved => "approved",
            RecommendationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RecommendationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RecommendationStatus::Pending),
            "approved" => Ok(RecommendationStatus::Approved),
            "rejected" => Ok(RecommendationStatus::Rejected),
            other => Err(format!("unknown recommendation status: {}", other)),
        }
    }
}

/// A stored course recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Recommendation {
    pub id: i64,
    /// Student row ID.
    pub student_id: i64,
    /// Course row ID.
    pub course_id: i64,
    /// 1-based position in the run.
    pub rank: i64,
    /// Match score divided by 100.
    pub score: f64,
    pub reason: String,
    pub status: RecommendationStatus,
    pub created_at: String,
}

/// Input for writing a recommendation row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecommendation {
    pub student_id: i64,
    pub course_id: i64,
    pub rank: i64,
    pub score: f64,
    pub reason: String,
}

/// Aggregated generator usage for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub api_calls: i64,
    pub tokens_used: i64,
    pub chat_count: i64,
    pub recommend_count: i64,
    pub estimated_cost: f64,
}

/// Lifetime sums over all usage rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UsageTotals {
    pub total_api_calls: i64,
    pub total_tokens: i64,
    pub total_chats: i64,
    pub total_recommendations: i64,
}
