//! Usage and activity analytics.

use axum::extract::State;
use axum::Json;
use database::{
    chat_log, course, recommendation, student, usage_stats, RecommendationStatus, UsageStats,
    UsageTotals,
};
use mentor::scorer::truncate_chars;
use mentor::usage;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::AppState;

/// Days of daily usage included in the report.
const USAGE_WINDOW_DAYS: i64 = 30;

/// Rows per activity list.
const ACTIVITY_LIMIT: i64 = 10;

/// Characters of a question shown in the recent chat feed.
const QUESTION_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentActivity {
    pub student_id: String,
    pub name: String,
    pub chat_count: i64,
    pub recommendation_count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseActivity {
    pub code: String,
    pub name: String,
    pub material_count: i64,
    pub recommendation_count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    pub student_id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CourseRef {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatActivity {
    pub id: i64,
    pub question: String,
    pub confidence: f64,
    pub created_at: String,
    pub student: StudentRef,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationActivity {
    pub id: i64,
    pub score: f64,
    pub status: RecommendationStatus,
    pub created_at: String,
    pub student: StudentRef,
    pub course: CourseRef,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub usage_stats: Vec<UsageStats>,
    pub total_stats: UsageTotals,
    pub student_activity: Vec<StudentActivity>,
    pub course_activity: Vec<CourseActivity>,
    pub recent_chats: Vec<ChatActivity>,
    pub recent_recommendations: Vec<RecommendationActivity>,
}

/// Usage over the last 30 days, lifetime totals and recent activity.
pub async fn analytics(State(state): State<AppState>) -> Result<Json<AnalyticsResponse>> {
    let pool = state.db.pool();

    let usage_stats = usage_stats::list_since(pool, &usage::days_ago(USAGE_WINDOW_DAYS)).await?;
    let total_stats = usage_stats::totals(pool).await?;

    let student_activity = student::list_most_active(pool, ACTIVITY_LIMIT)
        .await?
        .into_iter()
        .map(|(student_id, name, chat_count, recommendation_count)| StudentActivity {
            student_id,
            name,
            chat_count,
            recommendation_count,
        })
        .collect();

    let course_activity = course::list_courses_with_activity(pool, ACTIVITY_LIMIT)
        .await?
        .into_iter()
        .map(|(code, name, material_count, recommendation_count)| CourseActivity {
            code,
            name,
            material_count,
            recommendation_count,
        })
        .collect();

    let recent_chats = chat_log::list_recent(pool, ACTIVITY_LIMIT)
        .await?
        .into_iter()
        .map(|chat| ChatActivity {
            id: chat.id,
            question: question_preview(&chat.question),
            confidence: chat.confidence,
            created_at: chat.created_at,
            student: StudentRef {
                student_id: chat.student_id,
                name: chat.student_name,
            },
        })
        .collect();

    let recent_recommendations = recommendation::list_recent(pool, ACTIVITY_LIMIT)
        .await?
        .into_iter()
        .map(|rec| RecommendationActivity {
            id: rec.id,
            score: rec.score,
            status: rec.status,
            created_at: rec.created_at,
            student: StudentRef {
                student_id: rec.student_id,
                name: rec.student_name,
            },
            course: CourseRef {
                code: rec.course_code,
                name: rec.course_name,
            },
        })
        .collect();

    Ok(Json(AnalyticsResponse {
        usage_stats,
        total_stats,
        student_activity,
        course_activity,
        recent_chats,
        recent_recommendations,
    }))
}

fn question_preview(question: &str) -> String {
    let preview = truncate_chars(question, QUESTION_PREVIEW_CHARS);
    if preview.len() < question.len() {
        format!("{}...", preview)
    } else {
        preview.to_string()
    }
}
