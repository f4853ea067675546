use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::repurpose::store::ContentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    /// AI gateway. Production: `LlmClient`.
    pub llm: Arc<dyn TextGenerator>,
    /// Persistence used by the generation orchestrator. Production: `PgContentStore`.
    pub store: Arc<dyn ContentStore>,
    pub config: Config,
}
