//! Contact Intake batch loader
//!
//! Loads a `;`-delimited contacts file into the database:
//!
//! ```text
//! intake-ingest contacts.csv
//! ```

use anyhow::Result;
use clap::Parser;
use intake_common::logging::{init_logging, LogConfig, LogLevel};
use intake_server::{
    config::DatabaseConfig,
    ingest,
    store::{ContactStore, PgContactStore},
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "intake-ingest")]
#[command(author, version, about = "Validate and load a contacts file")]
struct Cli {
    /// `;`-delimited file with a header row
    #[arg(default_value = "data.csv")]
    file: PathBuf,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS")]
    max_connections: Option<u32>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn database_config(&self) -> DatabaseConfig {
        let mut config = DatabaseConfig::default();
        if let Some(ref url) = self.database_url {
            config.url = url.clone();
        }
        if let Some(max) = self.max_connections {
            config.max_connections = max;
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_config = match log_config(cli.verbose) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid logging configuration: {}", e);
            return ExitCode::FAILURE;
        },
    };
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        },
    };

    match run(&cli).await {
        Ok(summary) => {
            info!("Rows inserted: {}", summary.inserted);
            info!("Rows rejected: {}", summary.rejected);
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!(error = %e, "Batch aborted");
            ExitCode::FAILURE
        },
    }
}

/// Logging defaults for the batch tool, overridden by `LOG_*` variables
fn log_config(verbose: bool) -> Result<LogConfig> {
    let level = if verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    LogConfig::builder()
        .level(level)
        .log_file_prefix("intake-ingest")
        .filter_directives("sqlx=warn")
        .build()
        .merge_env()
}

async fn run(cli: &Cli) -> Result<ingest::BatchSummary> {
    let store = PgContactStore::connect(&cli.database_config()).await?;

    let result = ingest::run_batch(&store, &cli.file).await;

    store.close().await;

    Ok(result?)
}
