//! products-api - HTTP CRUD service for a product catalog
//!
//! Layers, leaf-first:
//! - [`persistence`] - Product record and the store interface
//! - [`rest_api`] - validation chains, handlers and router
//! - [`http_server`] - server assembly (CORS, tracing, panic recovery)
//! - [`cli`] - configuration loading and process entry

pub mod cli;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod persistence;
pub mod rest_api;
