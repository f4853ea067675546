pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::projects::files::{MAX_FILES, MAX_FILE_SIZE};
use crate::projects::{handlers as projects, stats};
use crate::repurpose::handlers as repurpose;
use crate::state::AppState;

/// Room for the maximum number of maximum-size files plus the text fields.
const MAX_UPLOAD_BODY: usize = MAX_FILES * MAX_FILE_SIZE + 1024 * 1024;

/// Caller identity. Authentication happens upstream; handlers trust this id
/// and scope every query by it.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Projects
        .route(
            "/api/v1/projects",
            get(projects::handle_list_projects)
                .post(projects::handle_create_project)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY)),
        )
        .route("/api/v1/projects/:id", get(projects::handle_get_project))
        .route(
            "/api/v1/projects/:id/generate",
            post(repurpose::handle_generate),
        )
        .route(
            "/api/v1/projects/:id/regenerate",
            post(repurpose::handle_regenerate),
        )
        .route(
            "/api/v1/projects/content/:id",
            put(projects::handle_update_content),
        )
        .route(
            "/api/v1/projects/content/:id/approve",
            post(projects::handle_approve_content),
        )
        // Single-shot repurpose
        .route("/api/v1/content/repurpose", post(repurpose::handle_repurpose))
        .route("/api/v1/content/history", get(repurpose::handle_history))
        .route("/api/v1/content/:id", delete(repurpose::handle_delete_content))
        // Analytics
        .route("/api/v1/user/stats", get(stats::handle_user_stats))
        .with_state(state)
}
