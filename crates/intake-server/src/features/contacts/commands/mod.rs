pub mod submit;

pub use submit::{SubmitContactCommand, SubmitContactError, SubmitContactResponse};
