//! Sequential batch pipeline

use intake_common::{ContactCandidate, RecordContext, SchemaError, SourceReadError};
use std::path::Path;

use super::source;
use crate::store::ContactStore;

/// Outcome of a completed batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub inserted: usize,
    pub rejected: usize,
    /// Every per-row message, in file order
    pub errors: Vec<String>,
}

impl BatchSummary {
    /// Rows processed
    pub fn total(&self) -> usize {
        self.inserted + self.rejected
    }
}

/// Errors that abort a whole batch
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    SourceRead(#[from] SourceReadError),
}

/// Run one batch over the file at `path`
///
/// The store is left open; the caller owns its lifecycle.
///
/// # Errors
///
/// `Schema` when the contacts table cannot be ensured (no row is read), and
/// `SourceRead` when the file cannot be opened or decoded (no row is
/// inserted). Row-level failures are counted in the summary instead.
#[tracing::instrument(skip(store, path), fields(path = %path.display()))]
pub async fn run_batch(store: &dyn ContactStore, path: &Path) -> Result<BatchSummary, BatchError> {
    if let Err(e) = store.ensure_schema().await {
        tracing::error!(error = %e, "Failed to ensure contacts schema");
        return Err(e.into());
    }

    let rows = match source::read_contacts(path) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read batch file");
            return Err(e.into());
        },
    };

    let summary = process_rows(store, rows).await;

    tracing::info!(
        inserted = summary.inserted,
        rejected = summary.rejected,
        "Batch processing complete"
    );

    Ok(summary)
}

/// Validate and insert decoded rows one by one, numbering them from 1
///
/// The schema must already exist.
pub async fn process_rows(store: &dyn ContactStore, rows: Vec<ContactCandidate>) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for (idx, candidate) in rows.into_iter().enumerate() {
        let row = idx + 1;

        let contact = match candidate.trimmed().validate_into(RecordContext::Row(row)) {
            Ok(contact) => contact,
            Err(e) => {
                for message in &e.messages {
                    tracing::warn!(row, "{}", message);
                }
                summary.errors.extend(e.messages);
                summary.rejected += 1;
                continue;
            },
        };

        match store.insert(&contact).await {
            Ok(id) => {
                tracing::debug!(row, contact_id = id, "Row inserted");
                summary.inserted += 1;
            },
            Err(e) => {
                let message = format!("{}: Error inserting -> {}", RecordContext::Row(row), e.message);
                tracing::error!(row, "{}", message);
                summary.errors.push(message);
                summary.rejected += 1;
            },
        }
    }

    summary
}
