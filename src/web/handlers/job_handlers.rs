// src/web/handlers/job_handlers.rs
use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use super::upload::read_upload;
use crate::types::request::require_text;
use crate::types::{AnalysisResult, Job};
use crate::web::types::{
    busy_response, error_response, not_found_response, AnalyzeTextRequest, AnalyzedJob,
    ApiResult, AppState, DataResponse, DisplayFormat, DisplaySection, PdfAnalysisForm,
    ReanalyzeRequest,
};

pub async fn list_jobs_handler(state: &State<AppState>) -> Json<DataResponse<Vec<Job>>> {
    let board = state.board.read().await;
    let jobs = board.jobs().to_vec();
    let message = if jobs.is_empty() {
        "No jobs yet. Paste a job URL or description to analyze.".to_string()
    } else {
        format!("{} jobs analyzed", jobs.len())
    };
    Json(DataResponse::success(message, jobs))
}

pub async fn get_job_handler(id: i64, state: &State<AppState>) -> ApiResult<Job> {
    let board = state.board.read().await;
    match board.get(id) {
        Some(job) => Ok(Json(DataResponse::success(job.title.clone(), job.clone()))),
        None => Err(not_found_response(format!("Job {} not found", id))),
    }
}

pub async fn selected_job_handler(state: &State<AppState>) -> ApiResult<Job> {
    let board = state.board.read().await;
    match board.selected() {
        Some(job) => Ok(Json(DataResponse::success(job.title.clone(), job.clone()))),
        None => Err(not_found_response("Select a job to view details".to_string())),
    }
}

pub async fn select_job_handler(id: i64, state: &State<AppState>) -> ApiResult<Job> {
    let mut board = state.board.write().await;
    match board.select(id) {
        Some(job) => Ok(Json(DataResponse::success(
            format!("Selected {}", job.title),
            job.clone(),
        ))),
        None => Err(not_found_response(format!("Job {} not found", id))),
    }
}

pub async fn analyze_text_handler(
    request: Json<AnalyzeTextRequest>,
    state: &State<AppState>,
) -> ApiResult<AnalyzedJob> {
    let _guard = state
        .gates
        .analyze_text
        .try_acquire()
        .ok_or_else(busy_response)?;

    info!("Analyzing job text ({} chars)", request.jd_text.len());

    let result = state
        .client
        .submit_text_pair(&request.jd_text, &request.cv_text)
        .await
        .map_err(|e| {
            error!("Text analysis failed: {}", e);
            error_response(&e)
        })?;

    Ok(Json(record_analysis(state, &request.jd_text, result).await))
}

pub async fn analyze_pdf_handler(
    mut form: Form<PdfAnalysisForm<'_>>,
    state: &State<AppState>,
) -> ApiResult<AnalyzedJob> {
    let _guard = state
        .gates
        .analyze_pdf
        .try_acquire()
        .ok_or_else(busy_response)?;

    require_text("Job description", &form.jd_text).map_err(|e| error_response(&e))?;

    let cv_file = read_upload(&mut form.cv_file, "uploaded_cv.pdf", true)
        .await
        .and_then(|upload| upload.into_pdf())
        .map_err(|e| {
            error!("Rejected CV upload: {}", e);
            error_response(&e)
        })?;

    info!(
        "Analyzing job text against {} ({:.2} MB)",
        cv_file.file_name(),
        cv_file.size_mb()
    );

    let result = state
        .client
        .submit_text_with_pdf(&form.jd_text, &cv_file)
        .await
        .map_err(|e| {
            error!("PDF analysis failed: {}", e);
            error_response(&e)
        })?;

    Ok(Json(record_analysis(state, &form.jd_text, result).await))
}

/// Scores a job already on the board against new CV text.
pub async fn reanalyze_job_handler(
    id: i64,
    request: Json<ReanalyzeRequest>,
    state: &State<AppState>,
) -> ApiResult<AnalyzedJob> {
    let _guard = state
        .gates
        .reanalyze
        .try_acquire()
        .ok_or_else(busy_response)?;

    let description = state
        .board
        .read()
        .await
        .get(id)
        .map(|job| job.description.clone())
        .ok_or_else(|| not_found_response(format!("Job {} not found", id)))?;

    info!("Re-analyzing job {} ({} chars)", id, description.len());

    let result = state
        .client
        .submit_text_pair(&description, &request.cv_text)
        .await
        .map_err(|e| {
            error!("Re-analysis of job {} failed: {}", id, e);
            error_response(&e)
        })?;

    let job = state
        .board
        .write()
        .await
        .update_analysis(id, &result)
        .cloned()
        .ok_or_else(|| not_found_response(format!("Job {} not found", id)))?;

    let display_format = display_format_for(&result);
    Ok(Json(
        DataResponse::success(format!("Re-analyzed {}", job.title), AnalyzedJob { job, result })
            .with_display_format(display_format),
    ))
}

async fn record_analysis(
    state: &State<AppState>,
    job_text: &str,
    result: AnalysisResult,
) -> DataResponse<AnalyzedJob> {
    let job = state.board.write().await.add_analysis(job_text, &result).clone();
    info!("Added job {} ({:?}% match)", job.id, job.match_score);

    let display_format = display_format_for(&result);
    DataResponse::success("Job analyzed".to_string(), AnalyzedJob { job, result })
        .with_display_format(display_format)
}

fn display_format_for(result: &AnalysisResult) -> DisplayFormat {
    let mut sections = Vec::new();

    match result {
        AnalysisResult::Structured(analysis) => {
            if let Some(score) = analysis.match_score {
                sections.push(DisplaySection {
                    title: "Match Score".to_string(),
                    content: format!("{}% Match", score),
                    score: Some(crate::score::tier(score).label().to_string()),
                    points: None,
                });
            }
            if !analysis.strengths.is_empty() {
                sections.push(DisplaySection {
                    title: "Why this matches".to_string(),
                    content: String::new(),
                    score: None,
                    points: Some(analysis.strengths.clone()),
                });
            }
            if !analysis.missing_skills.is_empty() {
                sections.push(DisplaySection {
                    title: "Missing from your profile".to_string(),
                    content: String::new(),
                    score: None,
                    points: Some(analysis.missing_skills.clone()),
                });
            }
            if let Some(summary) = &analysis.summary {
                sections.push(DisplaySection {
                    title: "Summary".to_string(),
                    content: summary.clone(),
                    score: None,
                    points: None,
                });
            }
        }
        AnalysisResult::Raw { text } => {
            let points = extract_key_points(text);
            sections.push(DisplaySection {
                title: "AI Analysis Results".to_string(),
                content: text.clone(),
                score: None,
                points: if points.is_empty() { None } else { Some(points) },
            });
        }
    }

    DisplayFormat {
        format_type: "analysis".to_string(),
        sections: Some(sections),
    }
}

/// Bullet or numbered lines from free-form analysis text.
fn extract_key_points(analysis: &str) -> Vec<String> {
    analysis
        .lines()
        .map(str::trim)
        .filter(|line| {
            line.starts_with('•')
                || line.starts_with('-')
                || line.starts_with('*')
                || line.chars().next().map_or(false, |c| c.is_ascii_digit())
        })
        .map(|line| {
            line.trim_start_matches('•')
                .trim_start_matches('-')
                .trim_start_matches('*')
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .trim_start_matches('.')
                .trim()
                .to_string()
        })
        .filter(|point| !point.is_empty())
        .take(5)
        .collect()
}
