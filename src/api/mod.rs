use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::error::AppError;
use crate::fetcher::PageFetcher;

pub mod handlers;
pub mod models;

/// Built once at startup and shared read-only by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub fetcher: PageFetcher,
    pub llm: CompletionClient,
}

impl AppState {
    pub fn new(fetcher: PageFetcher, llm: CompletionClient) -> AppState {
        AppState { fetcher, llm }
    }

    pub fn from_config(config: &Config) -> Result<AppState, AppError> {
        let fetcher = PageFetcher::new(config.image_fetch_timeout)?;
        let llm = CompletionClient::new(
            config.groq_api_key.clone(),
            config.groq_model.clone(),
            config.groq_api_url.clone(),
        )?;
        Ok(AppState::new(fetcher, llm))
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // Mirrors the caller's origin, method and headers and allows credentials.
    let cors = CorsLayer::very_permissive();

    Router::new()
        .route("/health", get(health))
        .route("/fetch-job/", get(handlers::fetch_job_handler))
        .route("/fetch-job", get(handlers::fetch_job_handler))
        .route("/ask-question/", get(handlers::ask_question_handler))
        .route("/ask-question", get(handlers::ask_question_handler))
        .route("/fetch-image/", get(handlers::fetch_image_handler))
        .route("/fetch-image", get(handlers::fetch_image_handler))
        .with_state(state)
        .layer(cors)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
