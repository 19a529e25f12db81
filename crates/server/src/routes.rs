use std::path::Path;

use axum::{routing::get, Json, Router};
use todo_common::types::Health;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::observability;
use crate::state::AppState;

pub mod todos;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics() -> (axum::http::StatusCode, String) {
    observability::encode_metrics()
}

/// Todo API routes only, without static files or middleware.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/todos",
            get(todos::list_todos)
                .post(todos::create_todo)
                .fallback(todos::collection_method_not_allowed),
        )
        .route(
            "/api/todos/:id",
            get(todos::get_todo)
                .put(todos::update_todo)
                .patch(todos::update_todo)
                .delete(todos::delete_todo)
                .fallback(todos::item_method_not_allowed),
        )
}

/// Build the full application router: JSON API, health, metrics and the static frontend.
pub fn build_router(state: AppState, cors: CorsLayer, frontend_dir: &Path) -> Router {
    api_router()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .fallback_service(ServeDir::new(frontend_dir))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
