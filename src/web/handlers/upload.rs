// src/web/handlers/upload.rs
//! Reading multipart uploads into memory

use rocket::fs::TempFile;
use std::path::Path;
use tracing::warn;

use crate::error::{MatchError, Result};
use crate::types::request::{content_type_for, is_pdf_mime, OCTET_STREAM};
use crate::types::PdfFile;

pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn into_pdf(self) -> Result<PdfFile> {
        PdfFile::new(self.file_name, &self.content_type, self.bytes)
    }
}

/// Type and size are checked before the upload is read.
pub async fn read_upload(
    file: &mut TempFile<'_>,
    fallback_name: &str,
    require_pdf: bool,
) -> Result<Upload> {
    let file_name = file
        .raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str())
        .and_then(|raw| Path::new(raw).file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| fallback_name.to_string());

    let content_type = file
        .content_type()
        .map(|ct| ct.to_string())
        .or_else(|| content_type_for(&file_name).map(str::to_string))
        .unwrap_or_else(|| OCTET_STREAM.to_string());

    if require_pdf && !is_pdf_mime(&content_type) {
        return Err(MatchError::validation(format!(
            "Please select a PDF file: '{}' has type {}",
            file_name, content_type
        )));
    }

    if file.len() == 0 {
        return Err(MatchError::validation(format!("File '{}' is empty", file_name)));
    }

    // Rocket's `file` limit answers 413 first; this covers callers that raise it.
    if file.len() > MAX_UPLOAD_BYTES {
        return Err(MatchError::validation(format!(
            "File '{}' exceeds the {} MB limit",
            file_name,
            MAX_UPLOAD_BYTES / 1024 / 1024
        )));
    }

    let temp_path = std::env::temp_dir().join(format!("job_agent_upload_{}", uuid::Uuid::new_v4()));
    file.copy_to(&temp_path).await?;

    let bytes = tokio::fs::read(&temp_path).await;
    if let Err(e) = tokio::fs::remove_file(&temp_path).await {
        warn!("Failed to remove temp upload {}: {}", temp_path.display(), e);
    }

    Ok(Upload {
        file_name,
        content_type,
        bytes: bytes?,
    })
}
