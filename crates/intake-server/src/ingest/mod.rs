//! Batch contact ingestion
//!
//! Loads a `;`-delimited file of contacts and stores every valid row.
//!
//! # Flow
//!
//! 1. Ensure the contacts table exists; abort the batch if it cannot be created
//! 2. Decode the whole file ([`source::read_contacts`]); abort on I/O or decode errors
//! 3. Validate and insert rows one at a time, in file order ([`pipeline::process_rows`])
//! 4. Report inserted and rejected counts ([`BatchSummary`])
//!
//! A bad row is counted and logged, never fatal.

pub mod pipeline;
pub mod source;

pub use pipeline::{process_rows, run_batch, BatchError, BatchSummary};
pub use source::{read_contacts, DELIMITER};
