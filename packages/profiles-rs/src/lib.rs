//! HTTP client for the user-profile service.
//!
//! The profile service owns the rich user record (name, balance). The auth
//! service only ever notifies it: one POST per newly registered identity.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct ProfileOptions {
    /// Base URL of the profile service, e.g. `http://user-service:3002`.
    pub base_url: String,
    /// Request timeout for the profile-creation call.
    pub timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("request to profile service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("profile service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Payload for `POST {base_url}/users`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub auth_id: String,
    pub phone: String,
    pub name: String,
    pub balance: f64,
}

#[derive(Debug, Clone)]
pub struct ProfileService {
    client: Client,
    options: ProfileOptions,
}

impl ProfileService {
    pub fn new(options: ProfileOptions) -> Result<Self, ProfileError> {
        let client = Client::builder().timeout(options.timeout).build()?;
        Ok(Self { client, options })
    }

    /// Create a profile for a newly registered identity.
    ///
    /// Any non-2xx response is an error; the caller decides what an upstream
    /// failure means for the login in flight.
    pub async fn create_profile(&self, profile: &NewProfile) -> Result<(), ProfileError> {
        let url = format!("{}/users", self.options.base_url.trim_end_matches('/'));

        let response = self.client.post(url).json(profile).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProfileError::Status { status, body });
        }

        Ok(())
    }
}
