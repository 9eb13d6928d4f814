//! HTTP front end: a static page, a health check and the `/ask` endpoint.

mod error;
mod routes;

pub use error::ApiError;

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::{Extension, Router};
use tower_http::catch_panic::CatchPanicLayer;

use crate::answer::AnswerService;

/// Shared, read-only state handed to every request.
pub struct AppState {
    pub answers: AnswerService,
    pub default_api_key: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    routes::router()
        .layer(Extension(state))
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "internal server error".to_string()
    };
    log::error!("request handler panicked: {}", message);
    ApiError::Internal(message).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::util::ServiceExt;

    async fn explode() -> &'static str {
        panic!("kaboom")
    }

    #[tokio::test]
    async fn test_panic_becomes_json_500() {
        let app = Router::new()
            .route("/explode", get(explode))
            .layer(CatchPanicLayer::custom(handle_panic));

        let response = app
            .oneshot(Request::builder().uri("/explode").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("response json");
        assert_eq!(json, serde_json::json!({ "success": false, "error": "kaboom" }));
    }
}
