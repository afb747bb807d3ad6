// src/utils.rs
use anyhow::{Context, Result};
use std::path::Path;

/// Read file content as string with proper error context
pub async fn read_file_content(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Read file bytes with proper error context
pub async fn read_file_bytes(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// `@path` reads the text from a file; anything else is taken literally.
pub async fn resolve_text_arg(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) if !path.is_empty() => read_file_content(Path::new(path)).await,
        _ => Ok(arg.to_string()),
    }
}

/// Final path component, used as the multipart file name.
pub fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
}
