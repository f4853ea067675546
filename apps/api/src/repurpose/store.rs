//! Persistence seam for the generation orchestrator.
//!
//! `AppState` holds an `Arc<dyn ContentStore>`; production uses
//! `PgContentStore`, tests use an in-memory store.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::content::{ContentStatus, GeneratedContentRow};
use crate::models::project::ProjectStatus;
use crate::repurpose::normalizer::NormalizedContent;
use crate::repurpose::platform::Platform;

/// A generated-content row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub platform: String,
    pub status: ContentStatus,
    pub title: Option<String>,
    pub content: Option<String>,
    pub hashtags: Vec<String>,
    pub guidance: Value,
    pub error_message: Option<String>,
}

impl NewContentItem {
    pub fn complete(
        project_id: Uuid,
        user_id: Uuid,
        platform: &Platform,
        normalized: &NormalizedContent,
    ) -> Self {
        Self {
            project_id,
            user_id,
            platform: platform.to_string(),
            status: ContentStatus::Complete,
            title: Some(normalized.title().to_string()),
            content: Some(normalized.content().to_string()),
            hashtags: normalized.hashtags().to_vec(),
            guidance: normalized.guidance_json(),
            error_message: None,
        }
    }

    pub fn failed(project_id: Uuid, user_id: Uuid, platform: &Platform, message: String) -> Self {
        Self {
            project_id,
            user_id,
            platform: platform.to_string(),
            status: ContentStatus::Error,
            title: None,
            content: None,
            hashtags: Vec::new(),
            guidance: Value::Object(Default::default()),
            error_message: Some(message),
        }
    }
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Marks the project `generating` and records the requested platforms.
    async fn begin_generation(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        platforms: &[String],
    ) -> Result<(), AppError>;

    async fn insert_item(&self, item: NewContentItem) -> Result<GeneratedContentRow, AppError>;

    async fn set_project_status(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        status: ProjectStatus,
    ) -> Result<(), AppError>;
}

/// Postgres-backed store. Every statement is scoped by `user_id`.
pub struct PgContentStore {
    pool: PgPool,
}

impl PgContentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for PgContentStore {
    async fn begin_generation(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        platforms: &[String],
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET status = $1, selected_platforms = $2, updated_at = now()
            WHERE id = $3 AND user_id = $4
            "#,
        )
        .bind(ProjectStatus::Generating.as_str())
        .bind(platforms)
        .bind(project_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Project {project_id} not found")));
        }
        Ok(())
    }

    async fn insert_item(&self, item: NewContentItem) -> Result<GeneratedContentRow, AppError> {
        let row = sqlx::query_as::<_, GeneratedContentRow>(
            r#"
            INSERT INTO generated_content
                (project_id, user_id, platform, status, title, content, hashtags, guidance, error_message)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(item.project_id)
        .bind(item.user_id)
        .bind(&item.platform)
        .bind(item.status.as_str())
        .bind(&item.title)
        .bind(&item.content)
        .bind(&item.hashtags)
        .bind(&item.guidance)
        .bind(&item.error_message)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn set_project_status(
        &self,
        project_id: Uuid,
        user_id: Uuid,
        status: ProjectStatus,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE projects SET status = $1, updated_at = now() WHERE id = $2 AND user_id = $3",
        )
        .bind(status.as_str())
        .bind(project_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repurpose::normalizer::{normalize, HashtagDefaults};

    #[test]
    fn test_complete_item_copies_normalized_fields() {
        let normalized = normalize(
            r##"{"title": "T", "content": "C", "hashtags": ["#h"]}"##,
            &Platform::Linkedin,
            HashtagDefaults::Standard,
        );
        let item = NewContentItem::complete(Uuid::nil(), Uuid::nil(), &Platform::Linkedin, &normalized);
        assert_eq!(item.status, ContentStatus::Complete);
        assert_eq!(item.platform, "linkedin");
        assert_eq!(item.title.as_deref(), Some("T"));
        assert_eq!(item.content.as_deref(), Some("C"));
        assert_eq!(item.hashtags, vec!["#h".to_string()]);
        assert!(item.error_message.is_none());
    }

    #[test]
    fn test_failed_item_carries_only_the_message() {
        let item = NewContentItem::failed(
            Uuid::nil(),
            Uuid::nil(),
            &Platform::from("medium"),
            "Rate limit exceeded".to_string(),
        );
        assert_eq!(item.status, ContentStatus::Error);
        assert_eq!(item.platform, "medium");
        assert!(item.title.is_none() && item.content.is_none());
        assert_eq!(item.error_message.as_deref(), Some("Rate limit exceeded"));
    }
}
