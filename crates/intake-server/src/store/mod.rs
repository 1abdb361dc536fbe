//! Contact record store
//!
//! [`ContactStore`] is the seam between the intake surfaces and the backend.
//! The submission feature and the batch pipeline receive a store as an
//! explicit dependency; whoever created it closes it.
//!
//! - [`PgContactStore`]: PostgreSQL over a bounded `sqlx` pool
//! - [`MemoryContactStore`]: in-process store for tests (`test-support`)

use async_trait::async_trait;
use intake_common::{NewContact, SchemaError, StoreError};
use std::sync::Arc;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod postgres;

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryContactStore;
pub use postgres::PgContactStore;

/// Persistence operations for contact records
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Create the contacts table if it does not exist
    ///
    /// Idempotent; never drops or alters existing data.
    async fn ensure_schema(&self) -> Result<(), SchemaError>;

    /// Insert one validated contact and return its generated id
    async fn insert(&self, contact: &NewContact) -> Result<i64, StoreError>;

    /// Number of stored contacts
    async fn count(&self) -> Result<i64, StoreError>;

    /// Check that the backend answers
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Release backend resources
    async fn close(&self);
}

/// Shared handle passed to route handlers
pub type SharedStore = Arc<dyn ContactStore>;
