//! Contact submission feature
//!
//! - `commands/submit.rs` - validate and store one contact
//! - `extract.rs` - JSON or form-encoded request bodies
//! - `routes.rs` - HTTP wiring and error mapping

pub mod commands;
pub mod extract;
pub mod routes;

pub use commands::{SubmitContactCommand, SubmitContactError, SubmitContactResponse};
pub use routes::{contacts_routes, submit_contact};
