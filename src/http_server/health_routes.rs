//! Health check route.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Which product store is serving requests
    pub storage: &'static str,
}

/// `GET /health`
pub fn health_routes(storage: &'static str) -> Router {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        storage,
    };

    Router::new().route(
        "/health",
        get(move || async move { (StatusCode::OK, Json(response)).into_response() }),
    )
}
