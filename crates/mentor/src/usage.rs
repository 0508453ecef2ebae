//! Post-call usage recording.

use chrono::{Duration, Local};
use database::{usage_stats, Database, UsageFeature};
use llm_core::TokenUsage;

/// Today's local calendar date as `YYYY-MM-DD`.
pub fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// The local calendar date `days` days ago as `YYYY-MM-DD`.
pub fn days_ago(days: i64) -> String {
    (Local::now().date_naive() - Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

/// Estimated cost of `tokens` at `cost_per_1k_tokens`.
pub fn estimate_cost(tokens: u64, cost_per_1k_tokens: f64) -> f64 {
    tokens as f64 / 1000.0 * cost_per_1k_tokens
}

/// Add one generator call to today's usage row.
///
/// Errors are logged and dropped; a failed counter update never fails the
/// request that made the call.
pub async fn record_usage(
    db: &Database,
    feature: UsageFeature,
    usage: TokenUsage,
    cost_per_1k_tokens: f64,
) {
    let tokens = usage.total();
    let cost = estimate_cost(tokens, cost_per_1k_tokens);
    let date = today();

    match usage_stats::increment(db.pool(), &date, feature, tokens as i64, cost).await {
        Ok(()) => tracing::debug!(
            "Recorded {} usage for {}: {} tokens",
            feature.as_str(),
            date,
            tokens
        ),
        Err(e) => tracing::warn!("Failed to record {} usage: {}", feature.as_str(), e),
    }
}
