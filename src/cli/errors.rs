//! CLI-specific error types
//!
//! Every CLI error is fatal: `main` prints it and exits non-zero.

use thiserror::Error;

use crate::config::ConfigError;
use crate::persistence::StoreError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection or schema setup failed
    #[error("Boot failed: {0}")]
    Boot(#[from] StoreError),

    /// Runtime or listener I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
