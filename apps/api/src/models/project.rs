use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle of a repurposing project.
/// `scheduled` and `published` are set by clients, never by the orchestrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    Generating,
    Review,
    Scheduled,
    Published,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Generating => "generating",
            ProjectStatus::Review => "review",
            ProjectStatus::Scheduled => "scheduled",
            ProjectStatus::Published => "published",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ProjectStatus::Draft),
            "generating" => Some(ProjectStatus::Generating),
            "review" => Some(ProjectStatus::Review),
            "scheduled" => Some(ProjectStatus::Scheduled),
            "published" => Some(ProjectStatus::Published),
            _ => None,
        }
    }
}

/// Where the project's source content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Text,
    Url,
    File,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Text => "text",
            SourceKind::Url => "url",
            SourceKind::File => "file",
        }
    }

    /// Unknown or missing kinds are treated as plain text.
    pub fn parse(s: &str) -> Self {
        match s {
            "url" => SourceKind::Url,
            "file" => SourceKind::File,
            _ => SourceKind::Text,
        }
    }
}

/// Coarse file category derived from the MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Document,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Document => "document",
        }
    }

    /// Anything that is not image, video or audio counts as a document.
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            FileKind::Image
        } else if mime.starts_with("video/") {
            FileKind::Video
        } else if mime.starts_with("audio/") {
            FileKind::Audio
        } else {
            FileKind::Document
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub content_type: String,
    pub original_content: String,
    pub analysis_results: Option<Value>,
    pub suggested_platforms: Value,
    pub selected_platforms: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectFileRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub file_type: String,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
}
