use axum::extract::{Query, State};
use serde_json::Value;
use std::sync::Arc;

use crate::data_models::JobPosting;
use crate::decoder;
use crate::error::AppError;
use crate::prompts::{PAGE_DATA, PromptKind, PromptRequest, QUESTION};

use super::AppState;
use super::models::{AskQuestionParams, FetchImageParams, FetchJobParams, Payload, QueryResult};

pub async fn fetch_job_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FetchJobParams>,
) -> QueryResult {
    tracing::info!(url = %params.url, "fetch-job");
    let result = fetch_job(&state, &params.url).await.map(Payload::Data);
    log_failure("fetch-job", &params.url, &result);
    result.into()
}

pub async fn ask_question_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AskQuestionParams>,
) -> QueryResult {
    tracing::info!(url = %params.url, question = %params.question, "ask-question");
    let result = ask_question(&state, &params.url, &params.question)
        .await
        .map(Payload::Answer);
    log_failure("ask-question", &params.url, &result);
    result.into()
}

pub async fn fetch_image_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FetchImageParams>,
) -> QueryResult {
    tracing::info!(url = %params.url, "fetch-image");
    let result = fetch_image(&state, &params.url).await.map(Payload::Image);
    log_failure("fetch-image", &params.url, &result);
    result.into()
}

async fn fetch_job(state: &AppState, url: &str) -> Result<Value, AppError> {
    let page = state.fetcher.load_text(url).await?;
    let prompt = PromptKind::Extract
        .template()
        .render(&PromptRequest::new().with(PAGE_DATA, page.text))?;
    let completion = state.llm.complete(&prompt).await?;
    let data = decoder::parse_json(&completion)?;
    warn_on_missing_fields(&data);
    Ok(data)
}

async fn ask_question(state: &AppState, url: &str, question: &str) -> Result<String, AppError> {
    let page = state.fetcher.load_text(url).await?;
    let request = PromptRequest::new()
        .with(PAGE_DATA, page.text)
        .with(QUESTION, question);
    let prompt = PromptKind::Qa.template().render(&request)?;
    let completion = state.llm.complete(&prompt).await?;
    Ok(decoder::passthrough(completion))
}

async fn fetch_image(state: &AppState, url: &str) -> Result<String, AppError> {
    let body = state.fetcher.load_bytes(url).await?;
    Ok(decoder::og_image(&body)?)
}

// The model's JSON is returned as is; a posting without the expected keys is
// only worth a log line.
fn warn_on_missing_fields(data: &Value) {
    let postings: Vec<&Value> = match data {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };
    for posting in postings {
        let missing: Vec<&str> = JobPosting::FIELDS
            .into_iter()
            .filter(|field| posting.get(field).is_none())
            .collect();
        if !missing.is_empty() {
            tracing::warn!(?missing, "job posting is missing fields");
        }
    }
}

fn log_failure(route: &str, url: &str, result: &Result<Payload, AppError>) {
    if let Err(e) = result {
        tracing::warn!(route, url, kind = e.kind(), "request failed: {e}");
    }
}
