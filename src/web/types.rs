// src/web/types.rs
use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::core::MatchClient;
use crate::error::MatchError;
use crate::job_board::JobBoard;
use crate::submission::FormGates;
use crate::types::{AnalysisResult, Job};

/// Shared state managed by rocket.
pub struct AppState {
    pub client: MatchClient,
    pub board: RwLock<JobBoard>,
    pub gates: FormGates,
}

impl AppState {
    pub fn new(client: MatchClient, board: JobBoard) -> Self {
        Self {
            client,
            board: RwLock::new(board),
            gates: FormGates::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct AnalyzeTextRequest {
    pub jd_text: String,
    pub cv_text: String,
}

/// Re-analysis of a job already on the board.
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ReanalyzeRequest {
    pub cv_text: String,
}

#[derive(FromForm)]
pub struct PdfAnalysisForm<'f> {
    pub jd_text: String,
    pub cv_file: TempFile<'f>,
}

#[derive(FromForm)]
pub struct ExtractPdfForm<'f> {
    pub file: TempFile<'f>,
}

#[derive(FromForm)]
pub struct CvUploadForm<'f> {
    pub cv_file: TempFile<'f>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct AnalyzedJob {
    pub job: Job,
    pub result: AnalysisResult,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ExtractedText {
    pub text: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_format: Option<DisplayFormat>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DisplayFormat {
    #[serde(rename = "type")]
    pub format_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<DisplaySection>>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DisplaySection {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<String>>,
}

pub type ApiError = (Status, Json<StandardErrorResponse>);
pub type ApiResult<T> = Result<Json<DataResponse<T>>, ApiError>;

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            display_format: None,
        }
    }

    pub fn with_display_format(mut self, display_format: DisplayFormat) -> Self {
        self.display_format = Some(display_format);
        self
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }
}

/// HTTP status and envelope for a failed request.
pub fn error_response(err: &MatchError) -> ApiError {
    let status = match err {
        MatchError::Validation(_) => Status::BadRequest,
        MatchError::Network(_) | MatchError::Backend { .. } | MatchError::Decode { .. } => {
            Status::BadGateway
        }
        MatchError::AnalysisFailed(_) => Status::UnprocessableEntity,
        MatchError::Configuration(_) | MatchError::Io(_) => Status::InternalServerError,
    };

    let body = StandardErrorResponse::new(
        err.user_message(),
        err.code().to_string(),
        err.suggestions(),
    )
    .with_details(err.diagnostic_body().map(str::to_string));

    (status, Json(body))
}

pub fn busy_response() -> ApiError {
    (
        Status::Conflict,
        Json(StandardErrorResponse::new(
            "A submission from this form is already in progress".to_string(),
            "SUBMISSION_IN_PROGRESS".to_string(),
            vec!["Wait for the current analysis to finish".to_string()],
        )),
    )
}

pub fn not_found_response(what: String) -> ApiError {
    (
        Status::NotFound,
        Json(StandardErrorResponse::new(
            what,
            "NOT_FOUND".to_string(),
            vec!["List jobs with GET /api/jobs".to_string()],
        )),
    )
}
