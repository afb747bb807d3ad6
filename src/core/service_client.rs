// src/core/service_client.rs
//! HTTP client for the job matching backend

use reqwest::multipart::{Form, Part};
use reqwest::Response;
use serde_json::Value;
use tracing::{error, info, trace};

use crate::config::MatchClientConfig;
use crate::error::{MatchError, Result};
use crate::types::request::{cv_document_type, require_text, TextPairPayload};
use crate::types::response::{decode_analysis_body, decode_extraction_body};
use crate::types::{AnalysisRequest, AnalysisResult, PdfFile, PDF_MIME};

const ANALYZE_ENDPOINT: &str = "/analyze";
const EXTRACT_PDF_ENDPOINT: &str = "/extract_pdf";
const UPLOAD_CV_ENDPOINT: &str = "/upload-cv";

/// Outcome of a dispatched `AnalysisRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Analysis(AnalysisResult),
    ExtractedText(String),
}

#[derive(Debug, Clone)]
pub struct MatchClient {
    client: reqwest::Client,
    config: MatchClientConfig,
}

impl MatchClient {
    pub fn new(config: MatchClientConfig) -> Result<Self> {
        reqwest::Url::parse(&config.base_url).map_err(|e| {
            MatchError::Configuration(format!(
                "Invalid job matching URL '{}': {}",
                config.base_url, e
            ))
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MatchError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &MatchClientConfig {
        &self.config
    }

    /// Scores pasted job text (or a job URL) against pasted CV text.
    pub async fn submit_text_pair(&self, job_text: &str, cv_text: &str) -> Result<AnalysisResult> {
        require_text("Job description", job_text)?;
        require_text("CV text", cv_text)?;

        let url = self.config.endpoint_url(ANALYZE_ENDPOINT);
        info!("Calling job matching service: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&TextPairPayload {
                jd_text: job_text,
                cv_text,
            })
            .send()
            .await?;

        let body = read_success_body(response).await?;
        decode_analysis_body(&body)
    }

    /// Scores job text against an uploaded PDF résumé.
    pub async fn submit_text_with_pdf(
        &self,
        job_text: &str,
        cv_file: &PdfFile,
    ) -> Result<AnalysisResult> {
        require_text("Job description", job_text)?;

        let url = self.config.endpoint_url(self.config.pdf_endpoint.path());
        info!(
            "Calling PDF job matching service: {} ({}, {:.2} MB)",
            url,
            cv_file.file_name(),
            cv_file.size_mb()
        );

        // reqwest sets the multipart content type with its boundary.
        let form = Form::new()
            .text("jd_text", job_text.to_string())
            .part("cv_file", pdf_part(cv_file)?);

        let response = self.client.post(&url).multipart(form).send().await?;

        let body = read_success_body(response).await?;
        decode_analysis_body(&body)
    }

    /// Extraction only: returns the PDF's text, never a score.
    pub async fn extract_pdf_text(&self, pdf_file: &PdfFile) -> Result<String> {
        let url = self.config.endpoint_url(EXTRACT_PDF_ENDPOINT);
        info!("Calling PDF extraction service: {}", url);

        let form = Form::new().part("file", pdf_part(pdf_file)?);
        let response = self.client.post(&url).multipart(form).send().await?;

        let body = read_success_body(response).await?;
        decode_extraction_body(&body)
    }

    /// Uploads a CV document; the response shape belongs to the backend.
    /// `content_type` is the type declared by the uploader, if any.
    pub async fn upload_cv(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Value> {
        let content_type = cv_document_type(file_name, content_type).ok_or_else(|| {
            MatchError::validation(format!(
                "Unsupported file format: {}. Upload a PDF or Word document",
                file_name
            ))
        })?;

        if bytes.is_empty() {
            return Err(MatchError::validation(format!("File '{}' is empty", file_name)));
        }

        let url = self.config.endpoint_url(UPLOAD_CV_ENDPOINT);
        info!("Calling CV upload service: {}", url);

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| MatchError::Configuration(format!("Failed to create multipart: {e}")))?;
        let form = Form::new().part("cv_file", part);

        let response = self.client.post(&url).multipart(form).send().await?;

        let body = read_success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| MatchError::Decode {
            message: format!("response is not valid JSON: {e}"),
            body: Some(body),
        })
    }

    /// Validates and dispatches a tagged request.
    pub async fn submit(&self, request: &AnalysisRequest) -> Result<Submission> {
        request.validate()?;

        match request {
            AnalysisRequest::TextPair { job_text, cv_text } => self
                .submit_text_pair(job_text, cv_text)
                .await
                .map(Submission::Analysis),
            AnalysisRequest::TextWithPdf { job_text, cv_file } => self
                .submit_text_with_pdf(job_text, cv_file)
                .await
                .map(Submission::Analysis),
            AnalysisRequest::PdfOnlyExtraction { pdf_file } => self
                .extract_pdf_text(pdf_file)
                .await
                .map(Submission::ExtractedText),
        }
    }
}

fn pdf_part(file: &PdfFile) -> Result<Part> {
    Part::bytes(file.bytes().to_vec())
        .file_name(file.file_name().to_string())
        .mime_str(PDF_MIME)
        .map_err(|e| MatchError::Configuration(format!("Failed to create multipart: {e}")))
}

/// Returns the body of a 2xx response, or `Backend` with status and body.
async fn read_success_body(response: Response) -> Result<String> {
    let status = response.status();
    trace!("Response status: {}", status);

    if status.is_success() {
        Ok(response.text().await?)
    } else {
        let body_text = response.text().await.unwrap_or_default();
        error!("Job matching service error {}: {}", status, body_text);
        Err(MatchError::Backend {
            status_code: status.as_u16(),
            body_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let err = MatchClient::new(MatchClientConfig::new("not a url")).unwrap_err();
        assert!(matches!(err, MatchError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_upload_rejects_unknown_format_locally() {
        // Port 9 (discard) is never contacted: validation fails first.
        let client = MatchClient::new(MatchClientConfig::new("http://127.0.0.1:9")).unwrap();
        let err = client
            .upload_cv("notes.txt", None, b"hello".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));

        let err = client
            .upload_cv("cv.pdf", Some("image/png"), b"hello".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }
}
