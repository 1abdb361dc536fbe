//! In-memory contact store for tests

use async_trait::async_trait;
use chrono::Utc;
use intake_common::{NewContact, SchemaError, StoredContact, StoreError};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::ContactStore;

#[derive(Debug, Default)]
struct State {
    schema_ready: bool,
    schema_calls: usize,
    contacts: Vec<StoredContact>,
    next_id: i64,
}

/// Contact store that keeps rows in a `Vec`
///
/// Inserts can be made to fail for specific emails, or the schema step made
/// to fail, to exercise rejection paths.
#[derive(Debug, Default)]
pub struct MemoryContactStore {
    state: Mutex<State>,
    rejected_emails: Mutex<HashSet<String>>,
    fail_schema: AtomicBool,
    closed: AtomicBool,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every insert of a contact with this email fail
    pub fn reject_email(&self, email: impl Into<String>) {
        if let Ok(mut rejected) = self.rejected_emails.lock() {
            rejected.insert(email.into());
        }
    }

    /// Make `ensure_schema` fail from now on
    pub fn fail_schema(&self) {
        self.fail_schema.store(true, Ordering::SeqCst);
    }

    /// Snapshot of stored contacts in insertion order
    pub fn contacts(&self) -> Vec<StoredContact> {
        self.state
            .lock()
            .map(|state| state.contacts.clone())
            .unwrap_or_default()
    }

    /// How many times `ensure_schema` succeeded
    pub fn schema_calls(&self) -> usize {
        self.state.lock().map(|state| state.schema_calls).unwrap_or(0)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::new("memory store lock poisoned"))
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn ensure_schema(&self) -> Result<(), SchemaError> {
        if self.fail_schema.load(Ordering::SeqCst) {
            return Err(SchemaError::new("relation \"contacts\" could not be created"));
        }
        let mut state = self.lock().map_err(|e| SchemaError::new(e.message))?;
        state.schema_ready = true;
        state.schema_calls += 1;
        Ok(())
    }

    async fn insert(&self, contact: &NewContact) -> Result<i64, StoreError> {
        if self.is_closed() {
            return Err(StoreError::new("pool closed"));
        }

        let rejected = self
            .rejected_emails
            .lock()
            .map(|set| set.contains(&contact.email))
            .unwrap_or(false);
        if rejected {
            return Err(StoreError::new(format!(
                "insert rejected for '{}'",
                contact.email
            )));
        }

        let mut state = self.lock()?;
        if !state.schema_ready {
            return Err(StoreError::new("relation \"contacts\" does not exist"));
        }
        state.next_id += 1;
        let id = state.next_id;
        state
            .contacts
            .push(StoredContact::from_new(id, contact.clone(), Utc::now()));
        Ok(id)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let state = self.lock()?;
        Ok(state.contacts.len() as i64)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        if self.is_closed() {
            return Err(StoreError::new("pool closed"));
        }
        Ok(())
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn contact(email: &str) -> NewContact {
        NewContact {
            first_name: "Ann".to_string(),
            second_name: "Lee".to_string(),
            email: email.to_string(),
            phone: "0871234567".to_string(),
            eircode: "2AB3CD".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_increase_from_one() {
        let store = MemoryContactStore::new();
        store.ensure_schema().await.unwrap();
        assert_eq!(store.insert(&contact("a@b.ie")).await.unwrap(), 1);
        assert_eq!(store.insert(&contact("c@d.ie")).await.unwrap(), 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insert_requires_schema() {
        let store = MemoryContactStore::new();
        assert!(store.insert(&contact("a@b.ie")).await.is_err());
    }

    #[tokio::test]
    async fn test_ensure_schema_twice_keeps_rows() {
        let store = MemoryContactStore::new();
        store.ensure_schema().await.unwrap();
        store.insert(&contact("a@b.ie")).await.unwrap();
        store.ensure_schema().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.schema_calls(), 2);
    }

    #[tokio::test]
    async fn test_rejected_email_fails_insert() {
        let store = MemoryContactStore::new();
        store.ensure_schema().await.unwrap();
        store.reject_email("bad@b.ie");
        assert!(store.insert(&contact("bad@b.ie")).await.is_err());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_close_stops_inserts() {
        let store = MemoryContactStore::new();
        store.ensure_schema().await.unwrap();
        store.close().await;
        assert!(store.is_closed());
        assert!(store.health_check().await.is_err());
        assert!(store.insert(&contact("a@b.ie")).await.is_err());
    }
}
