//! Submit contact command
//!
//! Validates one contact and, when it passes, ensures the schema and inserts
//! it. Nothing touches the store when validation fails.

use intake_common::{
    ContactCandidate, RecordContext, SchemaError, StoreError, ValidationError,
};
use serde::{Deserialize, Serialize};

use crate::store::ContactStore;

/// Command carrying one candidate contact
#[derive(Debug, Clone, Default)]
pub struct SubmitContactCommand {
    pub candidate: ContactCandidate,
}

impl From<ContactCandidate> for SubmitContactCommand {
    fn from(candidate: ContactCandidate) -> Self {
        Self { candidate }
    }
}

/// Response from a stored submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitContactResponse {
    pub id: i64,
}

/// Errors that can occur when submitting a contact
#[derive(Debug, thiserror::Error)]
pub enum SubmitContactError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Handle a contact submission
///
/// # Errors
///
/// - `Validation` with every failed rule when the contact is invalid
/// - `Schema` when the contacts table cannot be ensured
/// - `Store` when the insert is rejected
#[tracing::instrument(skip(store, command))]
pub async fn handle(
    store: &dyn ContactStore,
    command: SubmitContactCommand,
) -> Result<SubmitContactResponse, SubmitContactError> {
    let contact = command
        .candidate
        .trimmed()
        .validate_into(RecordContext::Submission)?;

    store.ensure_schema().await?;

    let id = store.insert(&contact).await?;

    tracing::info!(contact_id = id, "Contact stored");

    Ok(SubmitContactResponse { id })
}
