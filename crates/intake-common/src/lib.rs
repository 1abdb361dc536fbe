//! Contact Intake Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, validation rules, and error handling for the contact intake
//! workspace.
//!
//! # Overview
//!
//! - **Types**: the contact record in its candidate, validated and stored forms
//! - **Validation**: the single rule set used by every intake surface
//! - **Error Handling**: validation, store, schema and source-read errors
//! - **Logging**: `tracing` subscriber setup shared by the binaries
//!
//! # Example
//!
//! ```
//! use intake_common::types::{ContactCandidate, RecordContext};
//!
//! let candidate = ContactCandidate::new("John", "Doe", "j@d.com", "0123456789", "1D09AB");
//! let contact = candidate.validate_into(RecordContext::Submission).unwrap();
//! assert_eq!(contact.first_name, "John");
//! ```

pub mod error;
pub mod logging;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{SchemaError, SourceReadError, StoreError, ValidationError};
pub use types::{ContactCandidate, NewContact, RecordContext, StoredContact};
pub use validation::validate;
