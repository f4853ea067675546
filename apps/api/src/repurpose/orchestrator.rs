//! Generation Orchestrator: fans a project out to every requested platform.
//!
//! Flow: mark project `generating` → per platform, concurrently:
//!       build_prompt → TextGenerator::generate → normalize → insert item
//!       → wait for every attempt → project `review` or `draft`.
//!
//! Platform attempts are isolated from each other: a failing AI call or a
//! failing insert for one platform is persisted as an `error` item for that
//! platform and never cancels its siblings.

use futures::future::join_all;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::content::GeneratedContentRow;
use crate::models::project::{ProjectRow, ProjectStatus};
use crate::repurpose::normalizer::{normalize, HashtagDefaults};
use crate::repurpose::platform::Platform;
use crate::repurpose::prompts::{build_prompt, FileContext};
use crate::repurpose::store::{ContentStore, NewContentItem};

/// Outcome of one generation batch.
/// `items` holds one row per requested platform, `complete` or `error`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub project_id: Uuid,
    pub status: ProjectStatus,
    pub requested: usize,
    pub completed: usize,
    pub items: Vec<GeneratedContentRow>,
}

/// Runs one generation batch for `project`.
///
/// Duplicate platforms are collapsed. Regenerating a single platform is the
/// same call with a one-element slice; it always inserts a new item.
///
/// Errors are returned only when persistence itself fails (status updates,
/// or the error record of a failed platform). In that case the project is
/// reset to `draft` on a best-effort basis; sibling rows already written stay.
pub async fn generate_for_platforms(
    store: &dyn ContentStore,
    llm: &dyn TextGenerator,
    project: &ProjectRow,
    files: &[FileContext],
    platforms: &[Platform],
) -> Result<GenerationReport, AppError> {
    let platforms = dedup_platforms(platforms);
    if platforms.is_empty() {
        return Err(AppError::Validation(
            "At least one platform is required".to_string(),
        ));
    }

    match run_batch(store, llm, project, files, &platforms).await {
        Ok(report) => Ok(report),
        Err(e) => {
            if let Err(reset_err) = store
                .set_project_status(project.id, project.user_id, ProjectStatus::Draft)
                .await
            {
                warn!(
                    project_id = %project.id,
                    error = %reset_err,
                    "Failed to reset project status after generation error"
                );
            }
            Err(e)
        }
    }
}

async fn run_batch(
    store: &dyn ContentStore,
    llm: &dyn TextGenerator,
    project: &ProjectRow,
    files: &[FileContext],
    platforms: &[Platform],
) -> Result<GenerationReport, AppError> {
    let ids: Vec<String> = platforms.iter().map(|p| p.to_string()).collect();
    store
        .begin_generation(project.id, project.user_id, &ids)
        .await?;

    info!(
        project_id = %project.id,
        platforms = ?ids,
        "Starting generation for {} platform(s)",
        platforms.len()
    );

    let attempts = platforms
        .iter()
        .map(|platform| run_platform(store, llm, project, files, platform));
    let results = join_all(attempts).await;

    let mut items = Vec::with_capacity(results.len());
    let mut persistence_error = None;
    for result in results {
        match result {
            Ok(row) => items.push(row),
            Err(e) => {
                error!(project_id = %project.id, error = %e, "Failed to persist platform outcome");
                persistence_error.get_or_insert(e);
            }
        }
    }
    if let Some(e) = persistence_error {
        return Err(e);
    }

    let completed = items.iter().filter(|item| item.is_complete()).count();
    let status = aggregate_status(completed, platforms.len());
    store
        .set_project_status(project.id, project.user_id, status)
        .await?;

    info!(
        project_id = %project.id,
        "Generation finished: {}/{} complete, project status {}",
        completed,
        platforms.len(),
        status.as_str()
    );

    Ok(GenerationReport {
        project_id: project.id,
        status,
        requested: platforms.len(),
        completed,
        items,
    })
}

/// One platform's pipeline. Any failure becomes an `error` row; only a failure
/// to write that row escapes.
async fn run_platform(
    store: &dyn ContentStore,
    llm: &dyn TextGenerator,
    project: &ProjectRow,
    files: &[FileContext],
    platform: &Platform,
) -> Result<GeneratedContentRow, AppError> {
    match attempt_platform(store, llm, project, files, platform).await {
        Ok(row) => Ok(row),
        Err(e) => {
            warn!(
                project_id = %project.id,
                platform = %platform,
                error = %e,
                "Generation failed for platform (isolated)"
            );
            store
                .insert_item(NewContentItem::failed(
                    project.id,
                    project.user_id,
                    platform,
                    e.to_string(),
                ))
                .await
        }
    }
}

async fn attempt_platform(
    store: &dyn ContentStore,
    llm: &dyn TextGenerator,
    project: &ProjectRow,
    files: &[FileContext],
    platform: &Platform,
) -> Result<GeneratedContentRow, AppError> {
    let prompt = build_prompt(&project.original_content, platform, files);
    let raw = llm.generate(&prompt).await?;

    let normalized = normalize(&raw, platform, HashtagDefaults::Standard);
    if normalized.content().trim().is_empty() {
        return Err(LlmError::GenerationFailed("model returned an empty reply".to_string()).into());
    }
    if normalized.is_fallback() {
        warn!(
            project_id = %project.id,
            platform = %platform,
            "Model output was not JSON, using fallback content"
        );
    }

    store
        .insert_item(NewContentItem::complete(
            project.id,
            project.user_id,
            platform,
            &normalized,
        ))
        .await
}

/// `review` only when every requested platform completed.
pub fn aggregate_status(completed: usize, requested: usize) -> ProjectStatus {
    if completed == requested {
        ProjectStatus::Review
    } else {
        ProjectStatus::Draft
    }
}

fn dedup_platforms(platforms: &[Platform]) -> Vec<Platform> {
    let mut seen = std::collections::HashSet::new();
    platforms
        .iter()
        .filter(|p| seen.insert((*p).clone()))
        .cloned()
        .collect()
}
