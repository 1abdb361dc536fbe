//! Contact validation rules
//!
//! The single rule set shared by the submission endpoint and the batch
//! pipeline.
//!
//! # Rules
//!
//! | Field | Rule |
//! |---|---|
//! | `first_name`, `second_name` | 1-20 ASCII letters or digits |
//! | `email` | `local@domain`, no whitespace, a dot inside the domain |
//! | `phone` | exactly 10 ASCII digits |
//! | `eircode` | 6 characters: a digit followed by 5 letters or digits |
//!
//! Presence is checked before format. If any field is missing or empty only
//! the "Missing" messages are returned; otherwise every failing format rule
//! is reported.
//!
//! # Examples
//!
//! ```
//! use intake_common::types::{ContactCandidate, RecordContext};
//! use intake_common::validation::validate;
//!
//! let candidate = ContactCandidate::new("John", "Doe", "j@d.com", "12345", "1D09AB");
//! let errors = validate(&candidate, RecordContext::Row(1));
//! assert_eq!(errors, vec!["Row 1: Invalid phone (must contain exactly 10 digits).".to_string()]);
//! ```

use crate::types::{ContactCandidate, RecordContext};

/// Maximum length of a first or second name
pub const MAX_NAME_LENGTH: usize = 20;

/// Exact number of digits in a phone number
pub const PHONE_LENGTH: usize = 10;

/// Exact length of an eircode
pub const EIRCODE_LENGTH: usize = 6;

/// Validate a candidate contact, returning one message per failed rule
///
/// An empty vector means the candidate is valid.
pub fn validate(candidate: &ContactCandidate, context: RecordContext) -> Vec<String> {
    let fields = [
        ("first_name", candidate.first_name.as_deref()),
        ("second_name", candidate.second_name.as_deref()),
        ("email", candidate.email.as_deref()),
        ("phone", candidate.phone.as_deref()),
        ("eircode", candidate.eircode.as_deref()),
    ];

    let missing: Vec<String> = fields
        .iter()
        .filter(|(_, value)| value.map_or(true, str::is_empty))
        .map(|(name, _)| format!("{}: Missing {}", context, name))
        .collect();

    if !missing.is_empty() {
        tracing::debug!(%context, missing = missing.len(), "Contact is missing fields");
        return missing;
    }

    let [first_name, second_name, email, phone, eircode] = fields.map(|(_, v)| v.unwrap_or(""));

    let mut errors = Vec::new();

    if !is_valid_name(first_name) {
        errors.push(format!(
            "{}: Invalid first_name (letters/numbers only, max {}).",
            context, MAX_NAME_LENGTH
        ));
    }
    if !is_valid_name(second_name) {
        errors.push(format!(
            "{}: Invalid second_name (letters/numbers only, max {}).",
            context, MAX_NAME_LENGTH
        ));
    }
    if !is_valid_email(email) {
        errors.push(format!("{}: Invalid email format.", context));
    }
    if !is_valid_phone(phone) {
        errors.push(format!(
            "{}: Invalid phone (must contain exactly {} digits).",
            context, PHONE_LENGTH
        ));
    }
    if !is_valid_eircode(eircode) {
        errors.push(format!(
            "{}: Invalid eircode (must start with number, alphanumeric, {} chars).",
            context, EIRCODE_LENGTH
        ));
    }

    errors
}

/// 1-20 ASCII letters or digits
#[inline]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_LENGTH
        && name.chars().all(|c| c.is_ascii_alphanumeric())
}

/// `local@domain` where neither part contains whitespace or another `@`, and
/// the domain has a dot with at least one character on each side
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let clean = |part: &str| !part.is_empty() && !part.chars().any(|c| c == '@' || c.is_whitespace());
    if !clean(local) || !clean(domain) {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + c.len_utf8() < domain.len())
}

/// Exactly ten ASCII digits, nothing else
#[inline]
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_LENGTH && phone.bytes().all(|b| b.is_ascii_digit())
}

/// A digit followed by five ASCII letters or digits
pub fn is_valid_eircode(eircode: &str) -> bool {
    let bytes = eircode.as_bytes();
    match bytes.split_first() {
        Some((first, rest)) => {
            bytes.len() == EIRCODE_LENGTH
                && first.is_ascii_digit()
                && rest.iter().all(|b| b.is_ascii_alphanumeric())
        },
        None => false,
    }
}
