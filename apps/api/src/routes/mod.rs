pub mod health;

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;

use crate::errors::GENERIC_ERROR;
use crate::roles::handlers;
use crate::state::AppState;

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!("Handler panicked: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": GENERIC_ERROR })),
    )
        .into_response()
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler).fallback(not_found))
        .route(
            "/recommend",
            post(handlers::handle_recommend).fallback(not_found),
        )
        .route("/job/:role", get(handlers::handle_get_job).fallback(not_found))
        .route("/jobs", get(handlers::handle_list_jobs).fallback(not_found))
        // Wrong method on a known path is treated like an unknown path.
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}
