//! Contact record types
//!
//! A contact moves through three shapes:
//!
//! - [`ContactCandidate`]: raw input from a form, JSON body or CSV row; any
//!   field may be absent
//! - [`NewContact`]: a candidate that passed validation, ready to insert
//! - [`StoredContact`]: a persisted contact with its store-assigned `id` and
//!   `created_at`

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::validation;

/// Where a record came from, used as the prefix of every validation message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordContext {
    /// 1-based data row of a batch file (the header is not counted)
    Row(usize),
    /// A single HTTP submission
    Submission,
}

impl fmt::Display for RecordContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordContext::Row(n) => write!(f, "Row {}", n),
            RecordContext::Submission => write!(f, "Submission"),
        }
    }
}

/// Unvalidated contact input
///
/// Missing keys and `null` deserialize to `None` so the presence check can
/// report them instead of the decoder failing on the whole payload. Numbers
/// and booleans are kept as their text, so `"phone": 871234567` reaches the
/// phone rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactCandidate {
    #[serde(default, deserialize_with = "scalar_text")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub second_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub eircode: Option<String>,
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarText;

    impl<'de> de::Visitor<'de> for ScalarText {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(ScalarText)
}

impl ContactCandidate {
    /// Build a candidate with every field present
    pub fn new(
        first_name: impl Into<String>,
        second_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        eircode: impl Into<String>,
    ) -> Self {
        Self {
            first_name: Some(first_name.into()),
            second_name: Some(second_name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
            eircode: Some(eircode.into()),
        }
    }

    /// Strip leading and trailing whitespace from every present field
    pub fn trimmed(self) -> Self {
        let trim = |value: Option<String>| value.map(|v| v.trim().to_string());
        Self {
            first_name: trim(self.first_name),
            second_name: trim(self.second_name),
            email: trim(self.email),
            phone: trim(self.phone),
            eircode: trim(self.eircode),
        }
    }

    /// Validate the candidate and convert it into an insertable record
    ///
    /// # Errors
    ///
    /// Returns every message produced by [`validation::validate`] when any
    /// rule fails.
    pub fn validate_into(self, context: RecordContext) -> Result<NewContact, ValidationError> {
        let messages = validation::validate(&self, context);
        if !messages.is_empty() {
            return Err(ValidationError::new(messages));
        }

        // validate() reports every absent field, so all five are Some here
        match (
            self.first_name,
            self.second_name,
            self.email,
            self.phone,
            self.eircode,
        ) {
            (Some(first_name), Some(second_name), Some(email), Some(phone), Some(eircode)) => {
                Ok(NewContact {
                    first_name,
                    second_name,
                    email,
                    phone,
                    eircode,
                })
            },
            _ => Err(ValidationError::new(vec![format!(
                "{}: Missing required field",
                context
            )])),
        }
    }
}

/// A validated contact ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub first_name: String,
    pub second_name: String,
    pub email: String,
    pub phone: String,
    pub eircode: String,
}

/// A persisted contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredContact {
    pub id: i64,
    pub first_name: String,
    pub second_name: String,
    pub email: String,
    pub phone: String,
    pub eircode: String,
    pub created_at: DateTime<Utc>,
}

impl StoredContact {
    /// Attach store-assigned identity to a validated contact
    pub fn from_new(id: i64, contact: NewContact, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: contact.first_name,
            second_name: contact.second_name,
            email: contact.email,
            phone: contact.phone,
            eircode: contact.eircode,
            created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_context_display() {
        assert_eq!(RecordContext::Row(7).to_string(), "Row 7");
        assert_eq!(RecordContext::Submission.to_string(), "Submission");
    }

    #[test]
    fn test_missing_json_keys_become_none() {
        let candidate: ContactCandidate =
            serde_json::from_str(r#"{"first_name":"John","email":"j@d.com"}"#).unwrap();
        assert_eq!(candidate.first_name.as_deref(), Some("John"));
        assert!(candidate.second_name.is_none());
        assert!(candidate.phone.is_none());
    }

    #[test]
    fn test_scalar_json_values_become_text() {
        let candidate: ContactCandidate = serde_json::from_str(
            r#"{"first_name":"John","second_name":true,"phone":871234567,"eircode":null}"#,
        )
        .unwrap();
        assert_eq!(candidate.second_name.as_deref(), Some("true"));
        assert_eq!(candidate.phone.as_deref(), Some("871234567"));
        assert!(candidate.eircode.is_none());
    }

    #[test]
    fn test_nested_json_value_is_rejected() {
        let result: Result<ContactCandidate, _> = serde_json::from_str(r#"{"email":["j@d.com"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_trimmed_strips_every_field() {
        let candidate = ContactCandidate::new(" John ", "Doe\t", " j@d.com", "0123456789 ", " 1D09AB ")
            .trimmed();
        assert_eq!(candidate, ContactCandidate::new("John", "Doe", "j@d.com", "0123456789", "1D09AB"));
    }

    #[test]
    fn test_trimmed_whitespace_only_becomes_empty() {
        let candidate = ContactCandidate {
            first_name: Some("   ".to_string()),
            ..Default::default()
        }
        .trimmed();
        assert_eq!(candidate.first_name.as_deref(), Some(""));
    }

    #[test]
    fn test_validate_into_success() {
        let contact = ContactCandidate::new("John", "Doe", "j@d.com", "0123456789", "1D09AB")
            .validate_into(RecordContext::Submission)
            .unwrap();
        assert_eq!(contact.email, "j@d.com");
        assert_eq!(contact.eircode, "1D09AB");
    }

    #[test]
    fn test_validate_into_failure_carries_messages() {
        let err = ContactCandidate::new("John", "Doe", "j@d.com", "12345", "1D09AB")
            .validate_into(RecordContext::Row(2))
            .unwrap_err();
        assert_eq!(
            err.messages,
            vec!["Row 2: Invalid phone (must contain exactly 10 digits).".to_string()]
        );
    }

    #[test]
    fn test_stored_contact_from_new() {
        let contact = NewContact {
            first_name: "Ann".to_string(),
            second_name: "Lee".to_string(),
            email: "ann@lee.ie".to_string(),
            phone: "0871234567".to_string(),
            eircode: "2AB3CD".to_string(),
        };
        let now = Utc::now();
        let stored = StoredContact::from_new(5, contact, now);
        assert_eq!(stored.id, 5);
        assert_eq!(stored.first_name, "Ann");
        assert_eq!(stored.created_at, now);
    }
}
