use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::routes::UserIdQuery;
use crate::state::AppState;

/// Estimated hours saved per generated item.
const HOURS_SAVED_PER_ITEM: f64 = 0.75;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_content: i64,
    pub total_projects: i64,
    /// Projects created since the start of the current month.
    pub monthly_content: i64,
    pub time_saved: f64,
    pub platform_counts: BTreeMap<String, i64>,
    /// Engagement is not tracked yet; always 0.
    pub avg_engagement: i64,
}

/// GET /api/v1/user/stats
pub async fn handle_user_stats(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<UserStats>, AppError> {
    Ok(Json(load_user_stats(&state.db, params.user_id).await?))
}

async fn load_user_stats(pool: &PgPool, user_id: Uuid) -> Result<UserStats, AppError> {
    let total_projects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    let monthly_content: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM projects WHERE user_id = $1 AND created_at >= date_trunc('month', now())",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    let platform_rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT platform, COUNT(*) FROM generated_content WHERE user_id = $1 GROUP BY platform",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let platform_counts: BTreeMap<String, i64> = platform_rows.into_iter().collect();
    let total_content = platform_counts.values().sum();

    Ok(UserStats {
        total_content,
        total_projects,
        monthly_content,
        time_saved: time_saved(total_content),
        platform_counts,
        avg_engagement: 0,
    })
}

/// Hours saved, rounded to one decimal place.
pub fn time_saved(total_content: i64) -> f64 {
    (total_content as f64 * HOURS_SAVED_PER_ITEM * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_saved_rounds_to_one_decimal() {
        assert_eq!(time_saved(0), 0.0);
        assert_eq!(time_saved(1), 0.8);
        assert_eq!(time_saved(3), 2.3);
        assert_eq!(time_saved(4), 3.0);
    }
}
