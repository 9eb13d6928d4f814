use std::sync::Arc;

use axum::body::Bytes;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use log::{info, warn};
use serde_json::{json, Value};

use super::{ApiError, AppState};
use crate::answer::AnswerError;
use crate::question::normalize;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/ask", post(ask))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, PartialEq, Eq)]
struct AskRequest {
    question: String,
    api_key: Option<String>,
}

fn parse_ask_request(body: &[u8]) -> Result<AskRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::NoQuestion);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    let Some(fields) = value.as_object() else {
        return Err(ApiError::NoQuestion);
    };

    let question = match fields.get("question") {
        None => return Err(ApiError::NoQuestion),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(_) => return Err(ApiError::QuestionNotString),
    };
    if question.is_empty() {
        return Err(ApiError::EmptyQuestion);
    }

    let api_key = match fields.get("api_key") {
        None => None,
        // an explicit null still counts as "sent", so it never falls back
        Some(Value::Null) => Some(String::new()),
        Some(Value::String(key)) => Some(key.clone()),
        Some(_) => return Err(ApiError::ApiKeyNotString),
    };

    Ok(AskRequest { question, api_key })
}

async fn ask(
    Extension(state): Extension<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request = parse_ask_request(&body).map_err(|e| {
        info!("rejected /ask request: {}", e);
        e
    })?;

    // a key sent with the request wins, even an empty one
    let credential = request
        .api_key
        .as_deref()
        .or(state.default_api_key.as_deref());
    let processed_question = normalize(&request.question);

    info!("answering question ({} chars)", request.question.len());
    let answer = state
        .answers
        .get_answer(&request.question, credential)
        .await
        .map_err(|e| {
            if e == AnswerError::MissingCredential {
                warn!("/ask called without an API key");
            }
            ApiError::from(e)
        })?;

    Ok(Json(json!({
        "success": true,
        "original_question": request.question,
        "processed_question": processed_question,
        "answer": answer,
    })))
}
