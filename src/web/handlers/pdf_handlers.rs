// src/web/handlers/pdf_handlers.rs
use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::Value;
use tracing::{error, info};

use super::upload::read_upload;
use crate::web::types::{
    busy_response, error_response, ApiResult, AppState, CvUploadForm, DataResponse, ExtractPdfForm,
    ExtractedText,
};

/// Pre-fills CV text from a PDF; no scoring happens here.
pub async fn extract_pdf_handler(
    mut form: Form<ExtractPdfForm<'_>>,
    state: &State<AppState>,
) -> ApiResult<ExtractedText> {
    let _guard = state
        .gates
        .extract_pdf
        .try_acquire()
        .ok_or_else(busy_response)?;

    let pdf_file = read_upload(&mut form.file, "document.pdf", true)
        .await
        .and_then(|upload| upload.into_pdf())
        .map_err(|e| error_response(&e))?;

    let text = state
        .client
        .extract_pdf_text(&pdf_file)
        .await
        .map_err(|e| {
            error!("PDF extraction failed for {}: {}", pdf_file.file_name(), e);
            error_response(&e)
        })?;

    info!("Extracted {} chars from {}", text.len(), pdf_file.file_name());
    Ok(Json(DataResponse::success(
        "Text extracted".to_string(),
        ExtractedText { text },
    )))
}

pub async fn upload_cv_handler(
    mut form: Form<CvUploadForm<'_>>,
    state: &State<AppState>,
) -> ApiResult<Value> {
    let _guard = state
        .gates
        .upload_cv
        .try_acquire()
        .ok_or_else(busy_response)?;

    let upload = read_upload(&mut form.cv_file, "uploaded_cv.pdf", false)
        .await
        .map_err(|e| error_response(&e))?;

    let file_name = upload.file_name.clone();
    let response = state
        .client
        .upload_cv(&upload.file_name, Some(upload.content_type.as_str()), upload.bytes)
        .await
        .map_err(|e| {
            error!("CV upload failed for {}: {}", file_name, e);
            error_response(&e)
        })?;

    Ok(Json(DataResponse::success(
        format!("CV '{}' uploaded", file_name),
        response,
    )))
}
