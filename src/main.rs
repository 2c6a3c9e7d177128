//! products-api entry point
//!
//! Installs tracing, then delegates to the CLI module. Errors are printed
//! to stderr and the process exits non-zero.

use products_api::{cli, logging};

fn main() {
    logging::init_tracing();

    if let Err(e) = cli::run() {
        tracing::error!(error = %e, "products-api exited with an error");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
