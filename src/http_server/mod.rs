//! # HTTP Server Module
//!
//! Combines the product routes and the health check into one Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/products/*` - Product CRUD

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::{HttpServer, PRODUCTS_PATH};
