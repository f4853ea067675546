//! Single-shot repurposing kept for older clients: one platform, no project,
//! results stored in `repurposed_content`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::content::RepurposedContentRow;
use crate::models::pagination::{PageWindow, Pagination};
use crate::projects::queries::{truncate_chars, MAX_ORIGINAL_CONTENT_CHARS};
use crate::repurpose::normalizer::{normalize, HashtagDefaults, NormalizedContent};
use crate::repurpose::platform::Platform;
use crate::repurpose::prompts::build_prompt;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepurposeResult {
    pub id: Uuid,
    pub platform: Platform,
    pub title: String,
    pub content: String,
    pub hashtags: Vec<String>,
    pub guidance: Value,
    pub created_at: DateTime<Utc>,
}

impl RepurposeResult {
    fn new(row: &RepurposedContentRow, platform: Platform, normalized: &NormalizedContent) -> Self {
        Self {
            id: row.id,
            platform,
            title: normalized.title().to_string(),
            content: normalized.content().to_string(),
            hashtags: normalized.hashtags().to_vec(),
            guidance: normalized.guidance_json(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub content: Vec<RepurposedContentRow>,
    pub pagination: Pagination,
}

/// Generates one variant and records it. Gateway errors propagate; there is
/// no sibling to isolate them from.
pub async fn repurpose_once(
    pool: &PgPool,
    llm: &dyn TextGenerator,
    user_id: Uuid,
    original_content: &str,
    platform: Platform,
) -> Result<RepurposeResult, AppError> {
    let prompt = build_prompt(original_content, &platform, &[]);
    let raw = llm.generate(&prompt).await?;

    let normalized = normalize(&raw, &platform, HashtagDefaults::Legacy);
    if normalized.content().trim().is_empty() {
        return Err(LlmError::GenerationFailed("model returned an empty reply".to_string()).into());
    }
    if normalized.is_fallback() {
        warn!(platform = %platform, "Model output was not JSON, using fallback content");
    }

    let row = sqlx::query_as::<_, RepurposedContentRow>(
        r#"
        INSERT INTO repurposed_content
            (id, user_id, original_content, platform, repurposed_content, hashtags, title)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(truncate_chars(original_content, MAX_ORIGINAL_CONTENT_CHARS))
    .bind(platform.as_str())
    .bind(normalized.content())
    .bind(normalized.hashtags())
    .bind(normalized.title())
    .fetch_one(pool)
    .await?;

    info!("Repurposed content {} for {} (user {})", row.id, platform, user_id);

    Ok(RepurposeResult::new(&row, platform, &normalized))
}

pub async fn get_history(pool: &PgPool, user_id: Uuid, window: PageWindow) -> Result<HistoryPage, AppError> {
    let content = sqlx::query_as::<_, RepurposedContentRow>(
        r#"
        SELECT * FROM repurposed_content
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(window.limit)
    .bind(window.offset())
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM repurposed_content WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(HistoryPage {
        content,
        pagination: window.with_total(total),
    })
}

pub async fn delete_content(pool: &PgPool, content_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM repurposed_content WHERE id = $1 AND user_id = $2")
        .bind(content_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Content {content_id} not found")));
    }
    Ok(())
}
