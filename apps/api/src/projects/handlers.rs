//! Axum route handlers for the Projects API.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::analyze;
use crate::analysis::models::{AnalysisSource, ContentAnalysis, FileMeta, PlatformSuggestion};
use crate::errors::AppError;
use crate::models::content::GeneratedContentRow;
use crate::models::pagination::{PageWindow, Pagination};
use crate::models::project::{ProjectFileRow, ProjectRow, ProjectStatus, SourceKind};
use crate::projects::files::{
    extract_text, get_project_files, is_allowed_mime, store_files, UploadedFile, MAX_FILES,
    MAX_FILE_SIZE,
};
use crate::projects::queries::{
    get_generated_content, get_project, insert_project, list_projects, NewProject,
    ProjectFilters, ProjectSummaryRow,
};
use crate::routes::UserIdQuery;
use crate::state::AppState;

/// How many suggestions are pre-selected when smart detection is on.
const SMART_DETECT_PICKS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Fields of the multipart create-project form.
#[derive(Debug, Default)]
pub struct CreateProjectForm {
    pub user_id: Option<String>,
    pub name: String,
    pub content_type: String,
    pub content: String,
    pub url: String,
    pub smart_detect: bool,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Serialize)]
pub struct CreateProjectResponse {
    #[serde(flatten)]
    pub project: ProjectRow,
    pub analysis: ContentAnalysis,
    #[serde(rename = "suggestedPlatforms")]
    pub suggestions: Vec<PlatformSuggestion>,
    pub analysis_source: AnalysisSource,
    pub files: Vec<ProjectFileRow>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub user_id: Uuid,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectSummaryRow>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct ProjectDetailResponse {
    #[serde(flatten)]
    pub project: ProjectRow,
    pub generated_content: Vec<GeneratedContentRow>,
    pub files: Vec<ProjectFileRow>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub user_id: Uuid,
    pub title: Option<String>,
    pub content: Option<String>,
    pub hashtags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub user_id: Uuid,
    pub approved: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/projects
///
/// Multipart form. Analyzes the source, stores the project as `draft`, then
/// uploads any attached files. With `smartDetect=true` the top suggestions
/// are pre-selected.
pub async fn handle_create_project(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CreateProjectResponse>, AppError> {
    let form = read_create_form(multipart).await?;

    let user_id = form
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("user_id is required".to_string()))?;
    let user_id = Uuid::parse_str(user_id)
        .map_err(|_| AppError::Validation("user_id must be a valid UUID".to_string()))?;

    let name = form.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Project name is required".to_string()));
    }

    let content_type = SourceKind::parse(&form.content_type);
    let source = resolve_source(&form, content_type).await?;
    let file_metas: Vec<FileMeta> = form.files.iter().map(UploadedFile::meta).collect();

    let analysis = analyze(state.llm.as_ref(), &source, &file_metas).await;

    let selected_platforms = if form.smart_detect {
        analysis
            .suggested_platforms
            .iter()
            .take(SMART_DETECT_PICKS)
            .map(|p| p.id.clone())
            .collect()
    } else {
        Vec::new()
    };

    let project_id = Uuid::new_v4();
    let project = insert_project(
        &state.db,
        project_id,
        NewProject {
            user_id,
            name: name.to_string(),
            content_type,
            original_content: source,
            analysis_results: serde_json::to_value(&analysis.content_analysis)
                .map_err(|e| AppError::Internal(e.into()))?,
            suggested_platforms: serde_json::to_value(&analysis.suggested_platforms)
                .map_err(|e| AppError::Internal(e.into()))?,
            selected_platforms,
        },
    )
    .await?;

    let files = if form.files.is_empty() {
        Vec::new()
    } else {
        store_files(
            &state.s3,
            &state.config.s3_bucket,
            &state.db,
            user_id,
            project_id,
            &form.files,
        )
        .await?
    };

    info!(
        "Created project {} for user {} ({} suggestion(s), {} file(s))",
        project_id,
        user_id,
        analysis.suggested_platforms.len(),
        files.len()
    );

    Ok(Json(CreateProjectResponse {
        project,
        analysis: analysis.content_analysis,
        suggestions: analysis.suggested_platforms,
        analysis_source: analysis.source,
        files,
    }))
}

/// GET /api/v1/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Query(params): Query<ProjectListQuery>,
) -> Result<Json<ProjectListResponse>, AppError> {
    let window = PageWindow::new(params.page, params.limit);
    let filters = ProjectFilters {
        status: parse_status_filter(params.status.as_deref())?,
        search: params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };

    let (projects, total) =
        list_projects(&state.db, params.user_id, &filters, window.limit, window.offset()).await?;

    Ok(Json(ProjectListResponse {
        projects,
        pagination: window.with_total(total),
    }))
}

/// GET /api/v1/projects/:id
pub async fn handle_get_project(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProjectDetailResponse>, AppError> {
    let project = get_project(&state.db, project_id, params.user_id).await?;
    let generated_content = get_generated_content(&state.db, project_id, params.user_id).await?;
    let files = get_project_files(&state.db, project_id, params.user_id).await?;

    Ok(Json(ProjectDetailResponse {
        project,
        generated_content,
        files,
    }))
}

/// PUT /api/v1/projects/content/:id
///
/// Only the fields present in the body are changed.
pub async fn handle_update_content(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
    Json(request): Json<UpdateContentRequest>,
) -> Result<Json<GeneratedContentRow>, AppError> {
    let row = sqlx::query_as::<_, GeneratedContentRow>(
        r#"
        UPDATE generated_content
        SET title = COALESCE($1, title),
            content = COALESCE($2, content),
            hashtags = COALESCE($3, hashtags),
            updated_at = now()
        WHERE id = $4 AND user_id = $5
        RETURNING *
        "#,
    )
    .bind(&request.title)
    .bind(&request.content)
    .bind(&request.hashtags)
    .bind(content_id)
    .bind(request.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Content {content_id} not found")))?;

    Ok(Json(row))
}

/// POST /api/v1/projects/content/:id/approve
///
/// `approved_at` is stamped when approving and cleared when un-approving.
pub async fn handle_approve_content(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
    Json(request): Json<ApproveRequest>,
) -> Result<Json<GeneratedContentRow>, AppError> {
    let row = sqlx::query_as::<_, GeneratedContentRow>(
        r#"
        UPDATE generated_content
        SET approved = $1,
            approved_at = CASE WHEN $1 THEN now() ELSE NULL END,
            updated_at = now()
        WHERE id = $2 AND user_id = $3
        RETURNING *
        "#,
    )
    .bind(request.approved)
    .bind(content_id)
    .bind(request.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Content {content_id} not found")))?;

    info!("Content {} approval set to {}", content_id, request.approved);
    Ok(Json(row))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

async fn read_create_form(mut multipart: Multipart) -> Result<CreateProjectForm, AppError> {
    let mut form = CreateProjectForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        if field_name == "files" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid file upload: {e}")))?;

            // Browsers send an empty part for an untouched file input.
            if file_name.is_empty() && data.is_empty() {
                continue;
            }
            if form.files.len() == MAX_FILES {
                return Err(AppError::Validation(format!(
                    "Too many files. Maximum is {MAX_FILES} files."
                )));
            }
            if data.len() > MAX_FILE_SIZE {
                return Err(AppError::Validation(
                    "File too large. Maximum size is 100MB.".to_string(),
                ));
            }
            if !is_allowed_mime(&mime_type) {
                return Err(AppError::Validation(format!(
                    "Unsupported file type: {mime_type}"
                )));
            }

            form.files.push(UploadedFile {
                file_name,
                mime_type,
                data,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid form field {field_name}: {e}")))?;
        match field_name.as_str() {
            "user_id" => form.user_id = Some(value),
            "name" => form.name = value,
            "contentType" => form.content_type = value,
            "content" => form.content = value,
            "url" => form.url = value,
            "smartDetect" => form.smart_detect = value == "true",
            _ => {}
        }
    }

    Ok(form)
}

/// Text content wins, then the URL. File-sourced projects with neither fall
/// back to text extracted from their uploads.
async fn resolve_source(form: &CreateProjectForm, content_type: SourceKind) -> Result<String, AppError> {
    if !form.content.trim().is_empty() {
        return Ok(form.content.clone());
    }
    if !form.url.trim().is_empty() {
        return Ok(form.url.trim().to_string());
    }
    if content_type == SourceKind::File {
        return extract_text(&form.files).await;
    }
    Ok(String::new())
}

/// `all` and empty mean no filter; anything else must be a known status.
fn parse_status_filter(status: Option<&str>) -> Result<Option<ProjectStatus>, AppError> {
    match status.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(s) => ProjectStatus::parse(s)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Unknown status filter: {s}"))),
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn test_status_filter() {
        assert_eq!(parse_status_filter(None).unwrap(), None);
        assert_eq!(parse_status_filter(Some("all")).unwrap(), None);
        assert_eq!(parse_status_filter(Some(" ")).unwrap(), None);
        assert_eq!(
            parse_status_filter(Some("review")).unwrap(),
            Some(ProjectStatus::Review)
        );
        assert!(matches!(
            parse_status_filter(Some("archived")),
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_text_content_wins_over_url() {
        let form = CreateProjectForm {
            content: "Body text".to_string(),
            url: "https://example.com/post".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_source(&form, SourceKind::Text).await.unwrap(), "Body text");

        let url_only = CreateProjectForm {
            url: " https://example.com/post ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            resolve_source(&url_only, SourceKind::Url).await.unwrap(),
            "https://example.com/post"
        );
    }

    #[tokio::test]
    async fn test_file_project_uses_extracted_text() {
        let form = CreateProjectForm {
            files: vec![UploadedFile {
                file_name: "notes.md".to_string(),
                mime_type: "text/markdown".to_string(),
                data: Bytes::from_static(b"# Launch notes"),
            }],
            ..Default::default()
        };
        assert_eq!(
            resolve_source(&form, SourceKind::File).await.unwrap(),
            "# Launch notes"
        );
        // Text projects never read their attachments.
        assert_eq!(resolve_source(&form, SourceKind::Text).await.unwrap(), "");
    }
}
