//! Postgres-backed credential store.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::domains::auth::models::User;
use crate::kernel::traits::CredentialStore;

/// Postgres unique_violation error code.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique constraint hit on insert: another request registered the same
    /// phone number between our lookup and our create. Recovered by re-fetch,
    /// never surfaced to callers.
    #[error("identity record already exists")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Map a sqlx error, distinguishing the unique-violation race.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::Conflict;
            }
        }
        StoreError::Database(err)
    }
}

/// Credential store over the `users` table.
///
/// Each call checks a connection out of the pool for its own duration; the
/// pool guarantees release on every exit path.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, StoreError> {
        User::find_by_phone(phone_number, &self.pool).await
    }

    async fn create(&self, phone_number: &str, name: &str) -> Result<User, StoreError> {
        User::create(phone_number, name, &self.pool).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
