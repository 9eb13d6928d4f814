use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::answer::AnswerError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No question provided")]
    NoQuestion,
    #[error("Question cannot be empty")]
    EmptyQuestion,
    #[error("Question must be a string")]
    QuestionNotString,
    #[error("api_key must be a string")]
    ApiKeyNotString,
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),
    #[error(transparent)]
    Answer(#[from] AnswerError),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoQuestion | ApiError::EmptyQuestion => StatusCode::BAD_REQUEST,
            ApiError::QuestionNotString
            | ApiError::ApiKeyNotString
            | ApiError::InvalidBody(_)
            | ApiError::Answer(_)
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "success": false, "error": self.to_string() }));
        (status, body).into_response()
    }
}
