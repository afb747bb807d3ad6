// src/types/request.rs
//! Outbound request shapes and the validated PDF blob

use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::error::{MatchError, Result};

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A résumé or job file that is known to be a non-empty PDF.
#[derive(Clone, PartialEq, Eq)]
pub struct PdfFile {
    file_name: String,
    bytes: Vec<u8>,
}

impl PdfFile {
    pub fn new(file_name: impl Into<String>, content_type: &str, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        ensure_pdf_mime(content_type, &file_name)?;

        if bytes.is_empty() {
            return Err(MatchError::validation(format!(
                "PDF file '{}' is empty",
                file_name
            )));
        }

        Ok(Self { file_name, bytes })
    }

    /// Reads a PDF from disk. The MIME type is inferred from the extension and
    /// checked before the file is opened.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| MatchError::validation(format!("Not a file: {}", path.display())))?;

        let content_type = content_type_for(&file_name).unwrap_or(OCTET_STREAM);
        ensure_pdf_mime(content_type, &file_name)?;

        let bytes = tokio::fs::read(path).await?;
        Self::new(file_name, content_type, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &'static str {
        PDF_MIME
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0 / 1024.0
    }
}

impl fmt::Debug for PdfFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One analysis submission, consumed once by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    TextPair { job_text: String, cv_text: String },
    TextWithPdf { job_text: String, cv_file: PdfFile },
    PdfOnlyExtraction { pdf_file: PdfFile },
}

impl AnalysisRequest {
    pub fn text_pair(job_text: impl Into<String>, cv_text: impl Into<String>) -> Self {
        AnalysisRequest::TextPair {
            job_text: job_text.into(),
            cv_text: cv_text.into(),
        }
    }

    pub fn text_with_pdf(job_text: impl Into<String>, cv_file: PdfFile) -> Self {
        AnalysisRequest::TextWithPdf {
            job_text: job_text.into(),
            cv_file,
        }
    }

    pub fn extraction(pdf_file: PdfFile) -> Self {
        AnalysisRequest::PdfOnlyExtraction { pdf_file }
    }

    /// Pre-flight check; a failing request never reaches the network.
    pub fn validate(&self) -> Result<()> {
        match self {
            AnalysisRequest::TextPair { job_text, cv_text } => {
                require_text("Job description", job_text)?;
                require_text("CV text", cv_text)
            }
            AnalysisRequest::TextWithPdf { job_text, .. } => {
                require_text("Job description", job_text)
            }
            AnalysisRequest::PdfOnlyExtraction { .. } => Ok(()),
        }
    }

    pub fn job_text(&self) -> Option<&str> {
        match self {
            AnalysisRequest::TextPair { job_text, .. }
            | AnalysisRequest::TextWithPdf { job_text, .. } => Some(job_text),
            AnalysisRequest::PdfOnlyExtraction { .. } => None,
        }
    }

    /// Extraction calls return text, not a score.
    pub fn is_scoring(&self) -> bool {
        !matches!(self, AnalysisRequest::PdfOnlyExtraction { .. })
    }
}

/// JSON body for `/analyze`.
#[derive(Debug, Serialize)]
pub struct TextPairPayload<'a> {
    pub jd_text: &'a str,
    pub cv_text: &'a str,
}

pub fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MatchError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Accepts `application/pdf` regardless of case or parameters.
pub fn is_pdf_mime(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_MIME))
        .unwrap_or(false)
}

fn ensure_pdf_mime(content_type: &str, file_name: &str) -> Result<()> {
    if is_pdf_mime(content_type) {
        Ok(())
    } else {
        Err(MatchError::validation(format!(
            "Please select a PDF file: '{}' has type {}",
            file_name, content_type
        )))
    }
}

/// MIME type for a CV upload: PDF or Word only. A declared type wins unless it
/// is the generic `application/octet-stream`, then the extension decides.
pub fn cv_document_type(file_name: &str, declared: Option<&str>) -> Option<&'static str> {
    let essence = declared
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && !ct.eq_ignore_ascii_case(OCTET_STREAM));

    match essence {
        Some(ct) if ct.eq_ignore_ascii_case(PDF_MIME) => Some(PDF_MIME),
        Some(ct) if ct.eq_ignore_ascii_case(DOCX_MIME) => Some(DOCX_MIME),
        Some(_) => None,
        None => match content_type_for(file_name) {
            Some(ct @ (PDF_MIME | DOCX_MIME)) => Some(ct),
            _ => None,
        },
    }
}

/// Content type for a CV file name, by extension.
pub fn content_type_for(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())?;

    match extension.as_str() {
        "pdf" => Some(PDF_MIME),
        "docx" => Some(DOCX_MIME),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_mime_detection() {
        assert!(is_pdf_mime("application/pdf"));
        assert!(is_pdf_mime("Application/PDF; name=cv.pdf"));
        assert!(!is_pdf_mime("text/plain"));
        assert!(!is_pdf_mime(""));
    }

    #[test]
    fn test_pdf_file_rejects_other_types() {
        let err = PdfFile::new("cv.txt", "text/plain", b"hello".to_vec()).unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }

    #[test]
    fn test_pdf_file_rejects_empty_blob() {
        let err = PdfFile::new("cv.pdf", PDF_MIME, Vec::new()).unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("Resume.PDF"), Some(PDF_MIME));
        assert_eq!(content_type_for("resume.docx"), Some(DOCX_MIME));
        assert_eq!(content_type_for("resume"), None);
    }

    #[tokio::test]
    async fn test_from_path_checks_type_before_reading() {
        // The file does not exist; a type failure proves nothing was opened.
        let err = PdfFile::from_path(Path::new("/nonexistent/resume.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, MatchError::Validation(_)));
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let request = AnalysisRequest::text_pair("   ", "Rust developer");
        assert!(matches!(
            request.validate(),
            Err(MatchError::Validation(_))
        ));

        let request = AnalysisRequest::text_pair("Backend engineer", "\n\t");
        assert!(matches!(
            request.validate(),
            Err(MatchError::Validation(_))
        ));

        let request = AnalysisRequest::text_pair("Backend engineer", "Rust developer");
        assert!(request.validate().is_ok());
        assert!(request.is_scoring());
    }

    #[test]
    fn test_cv_document_type() {
        assert_eq!(cv_document_type("cv.pdf", None), Some(PDF_MIME));
        assert_eq!(cv_document_type("cv.DOCX", None), Some(DOCX_MIME));
        assert_eq!(cv_document_type("cv.txt", None), None);
        assert_eq!(cv_document_type("cv", Some(DOCX_MIME)), Some(DOCX_MIME));
        assert_eq!(cv_document_type("cv.pdf", Some("application/octet-stream")), Some(PDF_MIME));
        assert_eq!(cv_document_type("cv.pdf", Some("text/plain")), None);
        assert_eq!(cv_document_type("upload", Some("Application/PDF; name=cv")), Some(PDF_MIME));
    }
}
