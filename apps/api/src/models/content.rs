use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Generating,
    Complete,
    Error,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Generating => "generating",
            ContentStatus::Complete => "complete",
            ContentStatus::Error => "error",
        }
    }
}

/// One generation attempt for one (project, platform) pair.
/// Complete rows carry title/content/hashtags; error rows carry `error_message`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedContentRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub platform: String,
    pub status: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub hashtags: Vec<String>,
    pub guidance: Value,
    pub error_message: Option<String>,
    pub approved: bool,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GeneratedContentRow {
    pub fn is_complete(&self) -> bool {
        self.status == ContentStatus::Complete.as_str()
    }
}

/// Row of the single-shot repurpose history kept for older clients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RepurposedContentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub original_content: String,
    pub platform: String,
    pub repurposed_content: String,
    pub hashtags: Vec<String>,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}
