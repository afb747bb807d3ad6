// src/web/handlers/system_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::debug;

use crate::web::types::{AppState, TextResponse};

pub async fn health_handler(state: &State<AppState>) -> Json<TextResponse> {
    let backend = &state.client.config().base_url;
    debug!("Health check, backend {}", backend);
    Json(TextResponse::success(format!("OK (backend: {})", backend)))
}
