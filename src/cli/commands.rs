//! CLI command implementations

use std::sync::Arc;

use crate::config::{DatabaseConfig, ServiceConfig};
use crate::http_server::HttpServer;
use crate::persistence::{InMemoryProductStore, PgProductStore, ProductStore};

use super::args::Command;
use super::errors::CliResult;

/// Run a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config, port } => {
            let mut config = ServiceConfig::load(config.as_deref())?;
            if let Some(port) = port {
                config.server.port = port;
                config.validate()?;
            }

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(serve(config))
        }
    }
}

/// Connect the store and serve until the listener fails
pub async fn serve(config: ServiceConfig) -> CliResult<()> {
    let store = open_store(&config.database).await?;
    let server = HttpServer::with_store(config.server, store);
    server.start().await?;
    Ok(())
}

/// PostgreSQL when a URL is configured, otherwise in-memory
pub async fn open_store(config: &DatabaseConfig) -> CliResult<Arc<dyn ProductStore>> {
    match &config.url {
        Some(url) => {
            let store = PgProductStore::connect(url, config.max_connections)
                .await
                .inspect_err(|e| tracing::error!(error = %e, "database connection failed"))?;
            store.ensure_schema().await?;
            tracing::info!(max_connections = config.max_connections, "connected to PostgreSQL");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; products are kept in memory");
            Ok(Arc::new(InMemoryProductStore::new()))
        }
    }
}
