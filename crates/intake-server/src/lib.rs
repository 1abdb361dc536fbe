//! Contact Intake Server Library
//!
//! Accepts contact records over HTTP or from batch files, validates them with
//! the shared rules in `intake_common`, and stores the valid ones in
//! PostgreSQL.
//!
//! # Overview
//!
//! - **api**: router assembly, health check, server lifecycle
//! - **features**: the contact submission slice (command, extraction, routes)
//! - **ingest**: the sequential batch pipeline for `;`-delimited files
//! - **store**: the [`store::ContactStore`] seam and its PostgreSQL implementation
//! - **config**: environment-based configuration
//! - **middleware**: CORS and request tracing
//!
//! # Example
//!
//! ```no_run
//! use intake_server::{api, config::Config, store::{ContactStore, PgContactStore}};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let store = Arc::new(PgContactStore::connect(&config.database).await?);
//!     store.ensure_schema().await?;
//!     api::serve(&config, store.clone()).await?;
//!     store.close().await;
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod api;
pub mod config;
pub mod db;
pub mod features;
pub mod ingest;
pub mod middleware;
pub mod store;

// Re-export commonly used types
pub use ingest::{BatchError, BatchSummary};
pub use store::{ContactStore, PgContactStore, SharedStore};
