// TestDependencies - mock implementations for testing
//
// Provides an in-memory credential store and a recording profile notifier so
// the login flow and the HTTP surface can be exercised without Postgres or a
// running profile service.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::{CredentialStore, ProfileNotifier};
use crate::domains::auth::models::User;
use crate::domains::auth::store::StoreError;

// =============================================================================
// In-Memory Credential Store
// =============================================================================

/// In-memory store enforcing the same phone-uniqueness semantics as the
/// Postgres table: duplicate creates fail with `StoreError::Conflict`, ids
/// are assigned monotonically and never reused.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    inner: Mutex<InMemoryInner>,
}

#[derive(Default)]
struct InMemoryInner {
    users: HashMap<String, User>,
    next_id: i64,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identity records currently stored.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.get(phone_number).cloned())
    }

    async fn create(&self, phone_number: &str, name: &str) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.contains_key(phone_number) {
            return Err(StoreError::Conflict);
        }

        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            phone_number: phone_number.to_string(),
            name: name.to_string(),
            created_at: chrono::Utc::now(),
        };
        inner.users.insert(phone_number.to_string(), user.clone());
        Ok(user)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// =============================================================================
// Mock Profile Notifier
// =============================================================================

/// Arguments captured from a create_profile call
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCallArgs {
    pub auth_id: String,
    pub phone: String,
    pub name: String,
    pub balance: f64,
}

pub struct MockProfileNotifier {
    calls: Mutex<Vec<ProfileCallArgs>>,
    fail: Mutex<bool>,
}

impl MockProfileNotifier {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: Mutex::new(false),
        }
    }

    /// Make every subsequent call fail (simulated unreachable upstream).
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn calls(&self) -> Vec<ProfileCallArgs> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockProfileNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileNotifier for MockProfileNotifier {
    async fn create_profile(
        &self,
        auth_id: &str,
        phone: &str,
        name: &str,
        balance: f64,
    ) -> Result<()> {
        if *self.fail.lock().unwrap() {
            anyhow::bail!("profile service unreachable");
        }

        self.calls.lock().unwrap().push(ProfileCallArgs {
            auth_id: auth_id.to_string(),
            phone: phone.to_string(),
            name: name.to_string(),
            balance,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_store_assigns_monotonic_ids() {
        let store = InMemoryCredentialStore::new();
        let first = store.create("+15550001", "Ada").await.unwrap();
        let second = store.create("+15550002", "Grace").await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn in_memory_store_rejects_duplicate_phone() {
        let store = InMemoryCredentialStore::new();
        store.create("+15550001", "Ada").await.unwrap();

        let err = store.create("+15550001", "Imposter").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn in_memory_store_find_is_exact_match() {
        let store = InMemoryCredentialStore::new();
        store.create("+15550001", "Ada").await.unwrap();

        assert!(store.find_by_phone("+15550001").await.unwrap().is_some());
        assert!(store.find_by_phone("+1555000").await.unwrap().is_none());
        assert!(store.find_by_phone("+155500011").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn mock_notifier_records_calls_and_can_fail() {
        let notifier = MockProfileNotifier::new();
        notifier
            .create_profile("1", "+15550001", "Ada", 0.0)
            .await
            .unwrap();
        assert_eq!(notifier.call_count(), 1);
        assert_eq!(notifier.calls()[0].auth_id, "1");

        notifier.set_failing(true);
        assert!(notifier
            .create_profile("2", "+15550002", "Grace", 1.0)
            .await
            .is_err());
        assert_eq!(notifier.call_count(), 1);
    }
}
