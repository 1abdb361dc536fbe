//! Contact Intake Server - Main entry point

use anyhow::Result;
use intake_common::logging::{init_logging, LogConfig};
use std::sync::Arc;
use tracing::info;

use intake_server::{
    api,
    config::Config,
    store::{ContactStore, PgContactStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig::builder()
        .log_file_prefix("intake-server")
        .filter_directives("intake_server=debug,tower_http=debug,sqlx=warn")
        .build()
        .merge_env()?;
    let _log_guard = init_logging(&log_config)?;

    info!("Starting contact intake server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let store = Arc::new(PgContactStore::connect(&config.database).await?);

    // Ensured here and again before each submission
    if let Err(e) = store.ensure_schema().await {
        tracing::error!(error = %e, "Failed to start server");
        store.close().await;
        return Err(e.into());
    }

    let result = api::serve(&config, store.clone()).await;

    store.close().await;

    match result {
        Ok(()) => {
            info!("Server shut down gracefully");
            Ok(())
        },
        Err(e) => {
            tracing::error!(error = %e, "Server error");
            Err(e)
        },
    }
}
