use serde::Serialize;
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::content::GeneratedContentRow;
use crate::models::project::{ProjectRow, ProjectStatus, SourceKind};

/// Stored source text is capped at this many characters.
pub const MAX_ORIGINAL_CONTENT_CHARS: usize = 5000;

pub struct NewProject {
    pub user_id: Uuid,
    pub name: String,
    pub content_type: SourceKind,
    pub original_content: String,
    pub analysis_results: Value,
    pub suggested_platforms: Value,
    pub selected_platforms: Vec<String>,
}

/// A project in a listing, with how many generated items it has.
#[derive(Debug, Serialize, FromRow)]
pub struct ProjectSummaryRow {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub project: ProjectRow,
    pub generated_count: i64,
}

#[derive(Debug, Default)]
pub struct ProjectFilters {
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

pub async fn insert_project(pool: &PgPool, project_id: Uuid, new: NewProject) -> Result<ProjectRow, AppError> {
    Ok(sqlx::query_as::<_, ProjectRow>(
        r#"
        INSERT INTO projects
            (id, user_id, name, content_type, original_content, analysis_results,
             suggested_platforms, selected_platforms, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(project_id)
    .bind(new.user_id)
    .bind(&new.name)
    .bind(new.content_type.as_str())
    .bind(truncate_chars(&new.original_content, MAX_ORIGINAL_CONTENT_CHARS))
    .bind(&new.analysis_results)
    .bind(&new.suggested_platforms)
    .bind(&new.selected_platforms)
    .bind(ProjectStatus::Draft.as_str())
    .fetch_one(pool)
    .await?)
}

pub async fn get_project(pool: &PgPool, project_id: Uuid, user_id: Uuid) -> Result<ProjectRow, AppError> {
    sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1 AND user_id = $2")
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {project_id} not found")))
}

pub async fn get_generated_content(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<Vec<GeneratedContentRow>, AppError> {
    Ok(sqlx::query_as::<_, GeneratedContentRow>(
        r#"
        SELECT * FROM generated_content
        WHERE project_id = $1 AND user_id = $2
        ORDER BY created_at ASC
        "#,
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// One page of a user's projects, newest activity first, plus the total
/// number of matching projects.
pub async fn list_projects(
    pool: &PgPool,
    user_id: Uuid,
    filters: &ProjectFilters,
    limit: i64,
    offset: i64,
) -> Result<(Vec<ProjectSummaryRow>, i64), AppError> {
    let status = filters.status.map(|s| s.as_str());
    let pattern = filters.search.as_ref().map(|s| format!("%{s}%"));

    let rows = sqlx::query_as::<_, ProjectSummaryRow>(
        r#"
        SELECT p.*,
               (SELECT COUNT(*) FROM generated_content g WHERE g.project_id = p.id) AS generated_count
        FROM projects p
        WHERE p.user_id = $1
          AND ($2::text IS NULL OR p.status = $2)
          AND ($3::text IS NULL OR p.name ILIKE $3)
        ORDER BY p.updated_at DESC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(user_id)
    .bind(status)
    .bind(&pattern)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM projects
        WHERE user_id = $1
          AND ($2::text IS NULL OR status = $2)
          AND ($3::text IS NULL OR name ILIKE $3)
        "#,
    )
    .bind(user_id)
    .bind(status)
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    Ok((rows, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "é".repeat(6000);
        let truncated = truncate_chars(&text, MAX_ORIGINAL_CONTENT_CHARS);
        assert_eq!(truncated.chars().count(), 5000);
        assert_eq!(truncate_chars("short", 5000), "short");
    }
}
