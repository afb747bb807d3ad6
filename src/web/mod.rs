// src/web/mod.rs
//! Local web service holding the job list a UI renders

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use serde_json::Value;
use tracing::info;

use crate::core::{ConfigManager, MatchClient};
use crate::job_board::JobBoard;
use crate::types::{seed_jobs, Job};
use handlers::upload::MAX_UPLOAD_BYTES;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/health")]
pub async fn health(state: &State<AppState>) -> Json<TextResponse> {
    handlers::health_handler(state).await
}

#[get("/jobs")]
pub async fn list_jobs(state: &State<AppState>) -> Json<DataResponse<Vec<Job>>> {
    handlers::list_jobs_handler(state).await
}

#[get("/jobs/selected")]
pub async fn selected_job(state: &State<AppState>) -> ApiResult<Job> {
    handlers::selected_job_handler(state).await
}

#[get("/jobs/<id>")]
pub async fn get_job(id: i64, state: &State<AppState>) -> ApiResult<Job> {
    handlers::get_job_handler(id, state).await
}

#[post("/jobs/<id>/select")]
pub async fn select_job(id: i64, state: &State<AppState>) -> ApiResult<Job> {
    handlers::select_job_handler(id, state).await
}

#[post("/jobs/<id>/analyze", format = "json", data = "<request>")]
pub async fn reanalyze_job(
    id: i64,
    request: Json<ReanalyzeRequest>,
    state: &State<AppState>,
) -> ApiResult<AnalyzedJob> {
    handlers::reanalyze_job_handler(id, request, state).await
}

#[post("/jobs/analyze", format = "json", data = "<request>")]
pub async fn analyze_text(
    request: Json<AnalyzeTextRequest>,
    state: &State<AppState>,
) -> ApiResult<AnalyzedJob> {
    handlers::analyze_text_handler(request, state).await
}

#[post("/jobs/analyze-pdf", data = "<form>")]
pub async fn analyze_pdf(
    form: Form<PdfAnalysisForm<'_>>,
    state: &State<AppState>,
) -> ApiResult<AnalyzedJob> {
    handlers::analyze_pdf_handler(form, state).await
}

#[post("/extract-pdf", data = "<form>")]
pub async fn extract_pdf(
    form: Form<ExtractPdfForm<'_>>,
    state: &State<AppState>,
) -> ApiResult<ExtractedText> {
    handlers::extract_pdf_handler(form, state).await
}

#[post("/upload-cv", data = "<form>")]
pub async fn upload_cv(form: Form<CvUploadForm<'_>>, state: &State<AppState>) -> ApiResult<Value> {
    handlers::upload_cv_handler(form, state).await
}

#[options("/<_..>")]
pub async fn preflight() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the endpoint path".to_string()],
    ))
}

#[rocket::catch(413)]
pub fn payload_too_large() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        format!(
            "Upload exceeds the {} MB limit",
            MAX_UPLOAD_BYTES / 1024 / 1024
        ),
        "PAYLOAD_TOO_LARGE".to_string(),
        vec![
            "Compress the PDF or remove embedded images".to_string(),
            "Paste the CV text instead".to_string(),
        ],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body is missing required fields".to_string(),
        "UNPROCESSABLE_ENTITY".to_string(),
        vec![
            "Send jd_text and cv_text".to_string(),
            "Upload files as multipart/form-data".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Assembles the rocket instance without launching it.
pub fn build_rocket(state: AppState, port: u16) -> Rocket<Build> {
    let limits = Limits::default()
        .limit("file", MAX_UPLOAD_BYTES.bytes())
        .limit("data-form", (MAX_UPLOAD_BYTES + 1024 * 1024).bytes());

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("limits", limits));

    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register(
            "/api",
            catchers![
                bad_request,
                not_found,
                payload_too_large,
                unprocessable,
                internal_error
            ],
        )
        .mount(
            "/api",
            routes![
                health,
                list_jobs,
                selected_job,
                get_job,
                select_job,
                reanalyze_job,
                analyze_text,
                analyze_pdf,
                extract_pdf,
                upload_cv,
                preflight,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: &ConfigManager) -> Result<()> {
    let client = MatchClient::new(config.client_config())?;

    let board = if config.server.seed_jobs {
        JobBoard::with_jobs(seed_jobs())
    } else {
        JobBoard::new()
    };

    info!("Starting job agent API server");
    info!("Environment: {}", config.environment);
    info!("Job matching service: {}", client.config().base_url);
    info!("Server: http://127.0.0.1:{}", config.server.port);

    build_rocket(AppState::new(client, board), config.server.port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))?;

    Ok(())
}
