// src/config.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Backends expose PDF scoring under one of two names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PdfAnalysisEndpoint {
    #[default]
    AnalyzePdf,
    AnalyzeWithPdf,
}

impl PdfAnalysisEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            PdfAnalysisEndpoint::AnalyzePdf => "/analyze-pdf",
            PdfAnalysisEndpoint::AnalyzeWithPdf => "/analyze-with-pdf",
        }
    }
}

impl FromStr for PdfAnalysisEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('/').to_lowercase().as_str() {
            "analyze-pdf" => Ok(PdfAnalysisEndpoint::AnalyzePdf),
            "analyze-with-pdf" => Ok(PdfAnalysisEndpoint::AnalyzeWithPdf),
            other => Err(format!(
                "Unknown PDF analysis endpoint: {}. Use analyze-pdf or analyze-with-pdf",
                other
            )),
        }
    }
}

impl fmt::Display for PdfAnalysisEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where and how the match client talks to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchClientConfig {
    pub base_url: String,
    pub pdf_endpoint: PdfAnalysisEndpoint,
    pub timeout: Duration,
}

impl MatchClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            pdf_endpoint: PdfAnalysisEndpoint::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_pdf_endpoint(mut self, endpoint: PdfAnalysisEndpoint) -> Self {
        self.pdf_endpoint = endpoint;
        self
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for MatchClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
