//! HTTP layer: route handlers, DTOs, flash notices and router composition.

pub mod dto;
pub mod flash;
pub mod handlers;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;

/// Builds the page routes without state or middleware.
pub fn build_router() -> Router<AppState> {
    handlers::routes().fallback(handlers::not_found)
}

/// Builds the complete application: page routes, uploaded images under
/// `/images`, request tracing and the request body limit.
pub fn build_app(state: AppState) -> Router {
    let images = ServeDir::new(state.config.images_dir());
    let body_limit = state.config.max_request_bytes;
    build_router()
        .nest_service("/images", images)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
