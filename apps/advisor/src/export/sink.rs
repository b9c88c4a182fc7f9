//! Export sinks: where rendered plan documents are delivered.
//!
//! A sink either stores the whole document or fails; it never leaves a
//! partially written artifact behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::errors::AppError;
use crate::export::document::PlanDocument;

#[derive(Debug, Clone, Serialize)]
pub struct ExportReceipt {
    pub location: String,
    pub bytes: usize,
}

#[async_trait]
pub trait ExportSink: Send + Sync {
    async fn deliver(&self, document: &PlanDocument) -> Result<ExportReceipt, AppError>;
}

/// Turns user-derived text into a single path segment: separators and
/// control characters become `-`, and an empty or all-dot name becomes `_`s.
fn safe_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_control() => '-',
            _ => c,
        })
        .collect();

    if cleaned.chars().all(|c| c == '.') {
        "_".repeat(cleaned.len().max(1))
    } else {
        cleaned
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Local directory
// ────────────────────────────────────────────────────────────────────────────

/// Writes documents under `<root>/<user_id>/`. The file is written to a temp
/// file in the same directory and renamed into place once complete.
/// Filesystem work runs inside `tokio::task::spawn_blocking`.
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn write_atomically(dir: &Path, file_name: &str, body: &[u8]) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let target = dir.join(file_name);

    // Dropping an un-persisted NamedTempFile deletes it, so every early
    // return below cleans up after itself.
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(body)?;
    tmp.as_file().sync_all()?;
    tmp.persist(&target).map_err(|e| e.error)?;
    Ok(target)
}

#[async_trait]
impl ExportSink for DirectorySink {
    async fn deliver(&self, document: &PlanDocument) -> Result<ExportReceipt, AppError> {
        let dir = self.root.join(safe_file_name(&document.user_id));
        let file_name = safe_file_name(&document.filename);
        let body = document.body.clone();

        let target = tokio::task::spawn_blocking(move || write_atomically(&dir, &file_name, &body))
            .await
            .map_err(|e| AppError::Export(format!("Export task failed: {e}")))?
            .map_err(|e| AppError::Export(format!("Failed to write {}: {e}", document.filename)))?;

        info!("Exported {} ({} bytes)", target.display(), document.body.len());
        Ok(ExportReceipt {
            location: target.display().to_string(),
            bytes: document.body.len(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// S3 / MinIO
// ────────────────────────────────────────────────────────────────────────────

/// Uploads documents to `s3://<bucket>/exports/<user_id>/<filename>`.
pub struct S3Sink {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Sink {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

pub fn s3_key(document: &PlanDocument) -> String {
    format!(
        "exports/{}/{}",
        safe_file_name(&document.user_id),
        safe_file_name(&document.filename)
    )
}

#[async_trait]
impl ExportSink for S3Sink {
    async fn deliver(&self, document: &PlanDocument) -> Result<ExportReceipt, AppError> {
        let key = s3_key(document);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(document.body.clone()))
            .content_type(document.content_type)
            .send()
            .await
            .map_err(|e| AppError::Export(format!("S3 upload failed: {e}")))?;

        info!("Uploaded export to s3://{}/{}", self.bucket, key);
        Ok(ExportReceipt {
            location: format!("s3://{}/{}", self.bucket, key),
            bytes: document.body.len(),
        })
    }
}
