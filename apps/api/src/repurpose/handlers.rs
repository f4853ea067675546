//! Axum route handlers for generation and the single-shot repurpose API.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::pagination::PageWindow;
use crate::projects::files::{file_context, get_project_files};
use crate::projects::queries::get_project;
use crate::repurpose::legacy::{delete_content, get_history, repurpose_once, HistoryPage, RepurposeResult};
use crate::repurpose::orchestrator::{generate_for_platforms, GenerationReport};
use crate::repurpose::platform::Platform;
use crate::repurpose::prompts::FileContext;
use crate::routes::UserIdQuery;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Deserialize)]
pub struct RegenerateRequest {
    pub user_id: Uuid,
    pub platform: Platform,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepurposeRequest {
    #[serde(rename = "user_id")]
    pub user_id: Uuid,
    #[serde(default)]
    pub original_content: String,
    #[serde(default)]
    pub platform: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: Uuid,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Project generation
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/projects/:id/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerationReport>, AppError> {
    if request.platforms.is_empty() {
        return Err(AppError::Validation("Platforms array is required".to_string()));
    }
    if request.platforms.iter().any(|p| p.as_str().trim().is_empty()) {
        return Err(AppError::Validation("platform cannot be empty".to_string()));
    }
    run_generation(&state, project_id, request.user_id, &request.platforms).await
}

/// POST /api/v1/projects/:id/regenerate
///
/// Same pipeline with a single platform. Always adds a new item; earlier
/// items for that platform are kept.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(request): Json<RegenerateRequest>,
) -> Result<Json<GenerationReport>, AppError> {
    if request.platform.as_str().trim().is_empty() {
        return Err(AppError::Validation("platform cannot be empty".to_string()));
    }
    run_generation(&state, project_id, request.user_id, &[request.platform]).await
}

async fn run_generation(
    state: &AppState,
    project_id: Uuid,
    user_id: Uuid,
    platforms: &[Platform],
) -> Result<Json<GenerationReport>, AppError> {
    let project = get_project(&state.db, project_id, user_id).await?;
    let files: Vec<FileContext> = get_project_files(&state.db, project_id, user_id)
        .await?
        .iter()
        .map(file_context)
        .collect();

    let report = generate_for_platforms(
        state.store.as_ref(),
        state.llm.as_ref(),
        &project,
        &files,
        platforms,
    )
    .await?;

    Ok(Json(report))
}

// ────────────────────────────────────────────────────────────────────────────
// Single-shot repurpose
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/content/repurpose
pub async fn handle_repurpose(
    State(state): State<AppState>,
    Json(request): Json<RepurposeRequest>,
) -> Result<Json<RepurposeResult>, AppError> {
    if request.original_content.trim().is_empty() || request.platform.trim().is_empty() {
        return Err(AppError::Validation(
            "Original content and platform are required".to_string(),
        ));
    }

    let result = repurpose_once(
        &state.db,
        state.llm.as_ref(),
        request.user_id,
        &request.original_content,
        Platform::from(request.platform),
    )
    .await?;

    Ok(Json(result))
}

/// GET /api/v1/content/history
pub async fn handle_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<HistoryPage>, AppError> {
    let window = PageWindow::new(params.page, params.limit);
    Ok(Json(get_history(&state.db, params.user_id, window).await?))
}

/// DELETE /api/v1/content/:id
pub async fn handle_delete_content(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Value>, AppError> {
    delete_content(&state.db, content_id, params.user_id).await?;
    Ok(Json(json!({ "message": "Content deleted successfully" })))
}
