//! # Product REST API
//!
//! HTTP surface for the product resource:
//!
//! - `GET /` - list, ordered by price descending
//! - `GET /:id` - fetch one
//! - `POST /` - create
//! - `PUT /:id` - full update
//! - `PATCH /:id` - toggle availability
//! - `DELETE /:id` - delete
//!
//! Responses use the `{ "data": ... }`, `{ "errors": [...] }` and
//! `{ "error": "..." }` envelopes.

pub mod errors;
pub mod handler;
pub mod response;
pub mod router;
pub mod rules;
pub mod validation;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use handler::ProductState;
pub use response::DataResponse;
pub use router::product_routes;
pub use validation::{FieldError, Location, Rule, ValidationChain, ValidationErrors, Validated};
