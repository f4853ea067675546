//! Project file uploads: MIME whitelist, object-store upload, `project_files`
//! rows, and text extraction for file-sourced projects.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::Utc;
use futures::future::try_join_all;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::models::FileMeta;
use crate::errors::AppError;
use crate::models::project::{FileKind, ProjectFileRow};
use crate::repurpose::prompts::FileContext;

pub const MAX_FILES: usize = 10;
pub const MAX_FILE_SIZE: usize = 100 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: [&str; 12] = [
    "text/plain",
    "text/markdown",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "video/mp4",
    "video/mov",
    "video/avi",
];

/// A file received in a multipart request, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(&self.mime_type)
    }

    pub fn meta(&self) -> FileMeta {
        FileMeta {
            kind: self.kind(),
            file_name: self.file_name.clone(),
            size: self.data.len() as u64,
        }
    }
}

pub fn is_allowed_mime(mime: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mime)
}

/// Text after the last `.`; the whole name when there is none.
pub fn file_extension(file_name: &str) -> &str {
    file_name.rsplit('.').next().unwrap_or(file_name)
}

pub fn object_key(user_id: Uuid, project_id: Uuid, file_name: &str, timestamp_millis: i64) -> String {
    format!(
        "{}/{}/{}.{}",
        user_id,
        project_id,
        timestamp_millis,
        file_extension(file_name)
    )
}

/// Uploads every file concurrently and records one `project_files` row each.
/// The first failure aborts the batch.
pub async fn store_files(
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    pool: &PgPool,
    user_id: Uuid,
    project_id: Uuid,
    files: &[UploadedFile],
) -> Result<Vec<ProjectFileRow>, AppError> {
    // Concurrent uploads share a clock tick; offset by position to keep keys distinct.
    let base_millis = Utc::now().timestamp_millis();
    let uploads = files.iter().enumerate().map(|(i, file)| {
        let key = object_key(user_id, project_id, &file.file_name, base_millis + i as i64);
        store_file(s3, s3_bucket, pool, user_id, project_id, file, key)
    });
    let rows = try_join_all(uploads).await?;

    info!(
        project_id = %project_id,
        "Stored {} file(s) in s3://{}",
        rows.len(),
        s3_bucket
    );
    Ok(rows)
}

async fn store_file(
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    pool: &PgPool,
    user_id: Uuid,
    project_id: Uuid,
    file: &UploadedFile,
    key: String,
) -> Result<ProjectFileRow, AppError> {
    s3.put_object()
        .bucket(s3_bucket)
        .key(&key)
        .body(ByteStream::from(file.data.clone()))
        .content_type(&file.mime_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("upload of {key} failed: {e}")))?;

    let row = sqlx::query_as::<_, ProjectFileRow>(
        r#"
        INSERT INTO project_files
            (id, project_id, user_id, file_name, file_path, file_size, file_type, mime_type)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(project_id)
    .bind(user_id)
    .bind(&file.file_name)
    .bind(&key)
    .bind(file.data.len() as i64)
    .bind(file.kind().as_str())
    .bind(&file.mime_type)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_project_files(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<Vec<ProjectFileRow>, AppError> {
    Ok(sqlx::query_as::<_, ProjectFileRow>(
        "SELECT * FROM project_files WHERE project_id = $1 AND user_id = $2 ORDER BY created_at",
    )
    .bind(project_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// Prompt-side view of a stored file.
pub fn file_context(row: &ProjectFileRow) -> FileContext {
    FileContext {
        file_type: row.file_type.clone(),
        file_name: row.file_name.clone(),
    }
}

/// Source text for a file-only project: plain text and markdown read as
/// UTF-8, PDFs through `pdf-extract`. Other types contribute nothing.
pub async fn extract_text(files: &[UploadedFile]) -> Result<String, AppError> {
    let mut pieces = Vec::new();
    for file in files {
        let text = match file.mime_type.as_str() {
            "text/plain" | "text/markdown" => String::from_utf8_lossy(&file.data).into_owned(),
            "application/pdf" => extract_pdf_text(file).await?,
            _ => continue,
        };
        let text = text.trim();
        if !text.is_empty() {
            pieces.push(text.to_string());
        }
    }
    Ok(pieces.join("\n\n"))
}

async fn extract_pdf_text(file: &UploadedFile) -> Result<String, AppError> {
    let data = file.data.clone();
    let parsed = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}")))?;

    match parsed {
        Ok(text) => Ok(text),
        Err(e) => {
            // An unreadable PDF still gets uploaded; it just adds no text.
            warn!(file_name = %file.file_name, error = %e, "Could not extract text from PDF");
            Ok(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, mime: &str, data: &'static [u8]) -> UploadedFile {
        UploadedFile {
            file_name: name.to_string(),
            mime_type: mime.to_string(),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn test_extension_is_text_after_last_dot() {
        assert_eq!(file_extension("report.final.pdf"), "pdf");
        assert_eq!(file_extension("notes.md"), "md");
        assert_eq!(file_extension("README"), "README");
    }

    #[test]
    fn test_object_key_layout() {
        let user = Uuid::nil();
        let project = Uuid::from_u128(1);
        assert_eq!(
            object_key(user, project, "cover.png", 1_700_000_000_000),
            format!("{user}/{project}/1700000000000.png")
        );
    }

    #[test]
    fn test_mime_whitelist() {
        assert!(is_allowed_mime("application/pdf"));
        assert!(is_allowed_mime("video/mov"));
        assert!(!is_allowed_mime("application/zip"));
        assert!(!is_allowed_mime("audio/mpeg"));
    }

    #[test]
    fn test_meta_uses_byte_length_and_kind() {
        let meta = upload("cover.png", "image/png", b"12345").meta();
        assert_eq!(meta.kind, FileKind::Image);
        assert_eq!(meta.size, 5);
    }

    #[tokio::test]
    async fn test_extract_text_joins_text_files_and_skips_media() {
        let files = vec![
            upload("a.txt", "text/plain", b"  First part \n"),
            upload("b.png", "image/png", b"\x89PNG"),
            upload("c.md", "text/markdown", b"# Second part"),
            upload("d.txt", "text/plain", b"   "),
        ];
        let text = extract_text(&files).await.unwrap();
        assert_eq!(text, "First part\n\n# Second part");
    }

    #[tokio::test]
    async fn test_unreadable_pdf_contributes_nothing() {
        let files = vec![
            upload("broken.pdf", "application/pdf", b"not a pdf"),
            upload("a.txt", "text/plain", b"kept"),
        ];
        let text = extract_text(&files).await.unwrap();
        assert_eq!(text, "kept");
    }
}
