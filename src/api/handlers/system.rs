//! System endpoints: health check.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    version: &'static str,
    pets: usize,
    adoption_requests: usize,
}

/// `GET /health` — Liveness plus the size of both stores.
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let pets = state.shelter.pets().list_all().await.len();
    let adoption_requests = state.shelter.adoptions().list_all().await.len();
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        pets,
        adoption_requests,
    })
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
