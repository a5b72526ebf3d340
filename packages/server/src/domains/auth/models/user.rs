use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::domains::auth::store::StoreError;

/// User - minimal identity record keyed uniquely by phone number
///
/// Created exactly once on first login with a given phone number, never
/// updated and never deleted by this service.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub phone_number: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl User {
    /// Find a user by phone number
    pub async fn find_by_phone(phone_number: &str, pool: &PgPool) -> Result<Option<Self>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Insert a new user and return it with its assigned id
    ///
    /// The unique index on phone_number is the authoritative guard against
    /// concurrent registration; a violation surfaces as `StoreError::Conflict`.
    pub async fn create(phone_number: &str, name: &str, pool: &PgPool) -> Result<Self, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (phone_number, name)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(phone_number)
        .bind(name)
        .fetch_one(pool)
        .await
        .map_err(StoreError::from_sqlx)?;
        Ok(user)
    }
}
