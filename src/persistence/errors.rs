//! # Persistence Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a [`ProductStore`](super::ProductStore).
///
/// None of these are recovered by the request handlers; they surface as a
/// 500 at the HTTP boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Row vanished between fetch and write
    #[error("Product {0} no longer exists")]
    Missing(i64),

    /// In-memory store lock was poisoned
    #[error("Lock poisoned")]
    LockPoisoned,
}
