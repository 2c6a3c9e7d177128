//! # HTTP Server
//!
//! Main HTTP server: the product routes under `/api/products`, the health
//! check, and the cross-cutting layers (CORS, request tracing, panic
//! recovery).

use std::any::Any;
use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, AllowOrigin, CorsLayer};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::persistence::ProductStore;
use crate::rest_api::{product_routes, ErrorResponse, ProductState};

use super::config::HttpServerConfig;
use super::health_routes::health_routes;

/// Base path of the product resource
pub const PRODUCTS_PATH: &str = "/api/products";

/// HTTP server for the product API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over the given store
    pub fn with_store(config: HttpServerConfig, store: Arc<dyn ProductStore>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, store: Arc<dyn ProductStore>) -> Router {
        let storage = store.backend();
        let state = Arc::new(ProductState::new(store));

        Router::new()
            .merge(health_routes(storage))
            .nest(PRODUCTS_PATH, product_routes(state))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(trace_layer())
            .layer(cors_layer(&config.cors_origins))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<(), std::io::Error> {
        // Host names resolve here, so HOST=localhost works.
        let listener = TcpListener::bind(self.socket_addr()).await?;
        let addr = listener.local_addr()?;
        tracing::info!(%addr, "products API listening");
        tracing::info!("endpoints: {}/*, /health", PRODUCTS_PATH);

        axum::serve(listener, self.router).await
    }
}

/// One span and one response line per request, at INFO
fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

/// CORS for the configured origins; permissive when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(cors::Any)
    } else {
        let origins: Vec<HeaderValue> = origins.iter().filter_map(|s| s.parse().ok()).collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
}

/// Panics inside a handler become the generic 500 envelope
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::internal())).into_response()
}
