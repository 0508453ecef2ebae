//! Daily generator usage counters.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{UsageStats, UsageTotals};

/// Feature that made a generator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageFeature {
    Chat,
    Recommend,
}

impl UsageFeature {
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageFeature::Chat => "chat",
            UsageFeature::Recommend => "recommend",
        }
    }
}

/// Record one generator call against the row for `date` (`YYYY-MM-DD`).
///
/// Creates the row on first use and increments it atomically afterwards.
pub async fn increment(
    pool: &SqlitePool,
    date: &str,
    feature: UsageFeature,
    tokens: i64,
    cost: f64,
) -> Result<()> {
    let (chat, recommend) = match feature {
        UsageFeature::Chat => (1_i64, 0_i64),
        UsageFeature::Recommend => (0, 1),
    };

    sqlx::query(
        r#"
        INSERT INTO usage_stats (date, api_calls, tokens_used, chat_count, recommend_count, estimated_cost)
        VALUES (?, 1, ?, ?, ?, ?)
        ON CONFLICT(date) DO UPDATE SET
            api_calls = api_calls + 1,
            tokens_used = tokens_used + excluded.tokens_used,
            chat_count = chat_count + excluded.chat_count,
            recommend_count = recommend_count + excluded.recommend_count,
            estimated_cost = estimated_cost + excluded.estimated_cost
        "#,
    )
    .bind(date)
    .bind(tokens)
    .bind(chat)
    .bind(recommend)
    .bind(cost)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the usage row for one date.
pub async fn get(pool: &SqlitePool, date: &str) -> Result<UsageStats> {
    sqlx::query_as::<_, UsageStats>(
        r#"
        SELECT date, api_calls, tokens_used, chat_count, recommend_count, estimated_cost
        FROM usage_stats
        WHERE date = ?
        "#,
    )
    .bind(date)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "UsageStats",
        id: date.to_string(),
    })
}

/// Usage rows on or after `since` (`YYYY-MM-DD`), oldest first.
pub async fn list_since(pool: &SqlitePool, since: &str) -> Result<Vec<UsageStats>> {
    let rows = sqlx::query_as::<_, UsageStats>(
        r#"
        SELECT date, api_calls, tokens_used, chat_count, recommend_count, estimated_cost
        FROM usage_stats
        WHERE date >= ?
        ORDER BY date
        "#,
    )
    .bind(since)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Lifetime totals across all days.
pub async fn totals(pool: &SqlitePool) -> Result<UsageTotals> {
    let totals = sqlx::query_as::<_, UsageTotals>(
        r#"
        SELECT COALESCE(SUM(api_calls), 0) AS total_api_calls,
               COALESCE(SUM(tokens_used), 0) AS total_tokens,
               COALESCE(SUM(chat_count), 0) AS total_chats,
               COALESCE(SUM(recommend_count), 0) AS total_recommendations
        FROM usage_stats
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(totals)
}
