//! # Response Formatting
//!
//! Success envelope shared by every product endpoint.

use serde::Serialize;

/// Message returned by a successful delete
pub const DELETED_MESSAGE: &str = "Product Deleted";

/// Success envelope: `{ "data": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl DataResponse<&'static str> {
    pub fn deleted() -> Self {
        Self::new(DELETED_MESSAGE)
    }
}
