//! CLI argument definitions using clap
//!
//! Commands:
//! - products-api serve [--config <path>] [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Products API - HTTP CRUD service for the product catalog
#[derive(Parser, Debug)]
#[command(name = "products-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["products-api", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, None);
                assert_eq!(port, Some(8080));
            }
        }
    }

    #[test]
    fn test_parse_config_path() {
        let cli =
            Cli::try_parse_from(["products-api", "serve", "--config", "./products.json"]).unwrap();
        let Command::Serve { config, .. } = cli.command;
        assert_eq!(config, Some(PathBuf::from("./products.json")));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["products-api"]).is_err());
    }
}
