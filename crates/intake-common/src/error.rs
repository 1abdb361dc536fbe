//! Error taxonomy for contact intake
//!
//! Each error maps to one failure class of the intake pipeline. Callers decide
//! how fatal each one is: a [`ValidationError`] or [`StoreError`] only rejects
//! the record at hand during a batch, while [`SchemaError`] and
//! [`SourceReadError`] abort the enclosing operation.

use std::path::PathBuf;
use thiserror::Error;

/// One or more field presence or format failures for a single record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", messages.join("; "))]
pub struct ValidationError {
    /// Human-readable messages, one per failed rule, in field order
    pub messages: Vec<String>,
}

impl ValidationError {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

/// The backend rejected an operation on a single record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Store error: {message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Schema setup failed; nothing written afterwards can be trusted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Schema setup failed: {message}")]
pub struct SchemaError {
    pub message: String,
}

impl SchemaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A batch source file could not be opened or decoded
#[derive(Error, Debug)]
pub enum SourceReadError {
    #[error("Cannot open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot decode '{path}': {reason}")]
    Decode { path: PathBuf, reason: String },
}
