// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The login flow
// itself lives in domains/auth/actions and uses these seams.

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::auth::models::User;
use crate::domains::auth::store::StoreError;

// =============================================================================
// Credential Store Trait (Infrastructure - identity persistence)
// =============================================================================

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Exact-match lookup by phone number. No side effects.
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new identity record and return it with its assigned id.
    ///
    /// Returns `StoreError::Conflict` when the phone number already exists;
    /// callers treat that as a lost concurrent-registration race.
    async fn create(&self, phone_number: &str, name: &str) -> Result<User, StoreError>;

    /// Liveness probe for the backing store (health endpoint).
    async fn ping(&self) -> Result<(), StoreError>;
}

// =============================================================================
// Profile Notifier Trait (Infrastructure - outbound collaborator call)
// =============================================================================

/// Notifies the profile service that a new identity was registered.
///
/// Synchronous (from the caller's perspective) and fire-exactly-once today;
/// kept behind a trait so it can later be swapped for queue-based dispatch
/// without changing the orchestrator's contract.
#[async_trait]
pub trait ProfileNotifier: Send + Sync {
    async fn create_profile(
        &self,
        auth_id: &str,
        phone: &str,
        name: &str,
        balance: f64,
    ) -> Result<()>;
}
