//! Error taxonomy for job-match requests

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned status {status_code}: {body_text}")]
    Backend { status_code: u16, body_text: String },

    #[error("Failed to decode backend response: {message}")]
    Decode {
        message: String,
        body: Option<String>,
    },

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;

impl MatchError {
    pub fn validation(message: impl Into<String>) -> Self {
        MatchError::Validation(message.into())
    }

    /// Stable machine-readable code, used by the web envelope.
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::Validation(_) => "VALIDATION_ERROR",
            MatchError::Network(_) => "NETWORK_ERROR",
            MatchError::Backend { .. } => "BACKEND_ERROR",
            MatchError::Decode { .. } => "DECODE_ERROR",
            MatchError::AnalysisFailed(_) => "ANALYSIS_ERROR",
            MatchError::Configuration(_) => "CONFIG_ERROR",
            MatchError::Io(_) => "IO_ERROR",
        }
    }

    /// Message suitable for an end-user notification.
    pub fn user_message(&self) -> String {
        match self {
            MatchError::Validation(msg) => msg.clone(),
            MatchError::Network(_) => {
                "Could not reach the job matching service. Check your connection and that the backend is running.".to_string()
            }
            MatchError::Backend { status_code, .. } => {
                format!("The job matching service returned an error (HTTP {status_code})")
            }
            MatchError::Decode { .. } => {
                "The job matching service sent a response that could not be read".to_string()
            }
            MatchError::AnalysisFailed(msg) => format!("Analysis failed: {msg}"),
            MatchError::Configuration(msg) => format!("Configuration problem: {msg}"),
            MatchError::Io(e) => format!("Could not read input: {e}"),
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        let lines: &[&str] = match self {
            MatchError::Validation(_) => &[
                "Provide both a job description and a CV",
                "CV uploads must be PDF files",
            ],
            MatchError::Network(_) => &[
                "Verify JOB_MATCHING_API_URL points to the running backend",
                "Resubmit once the service is reachable",
            ],
            MatchError::Backend { .. } => &[
                "Try again in a few moments",
                "Check the backend logs for details",
            ],
            MatchError::Decode { .. } => &["Check that the backend version matches this client"],
            MatchError::AnalysisFailed(_) => &[
                "Resubmit the analysis",
                "Shorten the job description or CV if they are very long",
            ],
            MatchError::Configuration(_) => &["Review config.yaml and environment variables"],
            MatchError::Io(_) => &["Check that the file exists and is readable"],
        };
        lines.iter().map(|s| s.to_string()).collect()
    }

    /// Raw diagnostics payload carried by backend and decode failures.
    pub fn diagnostic_body(&self) -> Option<&str> {
        match self {
            MatchError::Backend { body_text, .. } => Some(body_text),
            MatchError::Decode { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for MatchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            MatchError::Configuration(err.to_string())
        } else if err.is_decode() {
            MatchError::Decode {
                message: err.to_string(),
                body: None,
            }
        } else if err.is_timeout() {
            MatchError::Network(format!("request timed out: {err}"))
        } else {
            MatchError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            MatchError::validation("x"),
            MatchError::Network("x".into()),
            MatchError::Backend {
                status_code: 500,
                body_text: "x".into(),
            },
            MatchError::Decode {
                message: "x".into(),
                body: None,
            },
            MatchError::AnalysisFailed("x".into()),
            MatchError::Configuration("x".into()),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_network_message_is_generic() {
        let err = MatchError::Network("dns error: lookup failed for host".into());
        assert!(!err.user_message().contains("dns"));
        assert!(err.user_message().contains("job matching service"));
    }

    #[test]
    fn test_backend_error_keeps_body() {
        let err = MatchError::Backend {
            status_code: 500,
            body_text: "internal error".into(),
        };
        assert_eq!(err.diagnostic_body(), Some("internal error"));
        assert_eq!(
            err.to_string(),
            "Backend returned status 500: internal error"
        );
    }
}
