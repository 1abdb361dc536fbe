//! Shared domain types

pub mod contact;

pub use contact::{ContactCandidate, NewContact, RecordContext, StoredContact};
