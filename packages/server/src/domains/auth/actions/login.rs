//! Login-or-register action

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domains::auth::errors::AuthError;
use crate::domains::auth::models::User;
use crate::domains::auth::store::StoreError;
use crate::domains::auth::token::TokenService;
use crate::kernel::traits::{CredentialStore, ProfileNotifier};

/// Input to the login flow.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub phone_number: String,
    /// Required when the phone number is seen for the first time.
    pub name: Option<String>,
    /// Initial balance forwarded to the profile service; defaults to 0.0.
    pub balance: Option<f64>,
}

/// A freshly minted bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
}

/// Log a user in, registering them on first sight of the phone number.
///
/// Lookup and create race against concurrent requests for the same number;
/// the unique constraint on phone_number is the authoritative guard. A
/// conflict on create means another request won the race, so we re-fetch the
/// record it inserted and continue to token minting. The losing caller skips
/// the profile call-out - the winner already made it.
///
/// When the profile call-out fails, the local record stays committed and the
/// whole login fails with `UpstreamUnavailable`. The orphaned record is an
/// accepted inconsistency window, reconciled out-of-band; the caller retries
/// and lands on the found path.
pub async fn login(
    request: LoginRequest,
    store: &dyn CredentialStore,
    profiles: Option<&dyn ProfileNotifier>,
    tokens: &TokenService,
) -> Result<IssuedToken, AuthError> {
    let phone_number = request.phone_number.trim();
    if phone_number.is_empty() {
        return Err(AuthError::InvalidRequest(
            "phoneNumber must not be empty".to_string(),
        ));
    }

    let user = match store.find_by_phone(phone_number).await? {
        // Existing identity wins; submitted name/balance are ignored.
        Some(user) => user,
        None => register(phone_number, &request, store, profiles).await?,
    };

    info!(user_id = user.id, "issuing access token");
    let access_token = tokens.issue(&user)?;

    Ok(IssuedToken {
        access_token,
        token_type: "bearer".to_string(),
    })
}

async fn register(
    phone_number: &str,
    request: &LoginRequest,
    store: &dyn CredentialStore,
    profiles: Option<&dyn ProfileNotifier>,
) -> Result<User, AuthError> {
    let name = match request.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(AuthError::InvalidRequest(
                "name is required when registering a new user".to_string(),
            ))
        }
    };

    let user = match store.create(phone_number, name).await {
        Ok(user) => user,
        Err(StoreError::Conflict) => {
            // Someone else just registered this number. Their record is the
            // login target and they own the profile call-out.
            info!(phone_number, "lost registration race, using existing record");
            return store
                .find_by_phone(phone_number)
                .await?
                .ok_or(AuthError::Store(StoreError::Conflict));
        }
        Err(e) => return Err(e.into()),
    };
    info!(user_id = user.id, "registered new user");

    if let Some(profiles) = profiles {
        let balance = request.balance.unwrap_or(0.0);
        if let Err(e) = profiles
            .create_profile(&user.id.to_string(), &user.phone_number, name, balance)
            .await
        {
            // The local record is already committed and stays that way.
            warn!(user_id = user.id, error = %e, "profile call-out failed");
            return Err(AuthError::UpstreamUnavailable);
        }
        info!(user_id = user.id, "profile created in user service");
    }

    Ok(user)
}
