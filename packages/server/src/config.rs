use anyhow::{Context, Result};
use dotenvy::dotenv;
use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret_key: String,
    pub jwt_algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
    /// Base URL of the profile service. When unset, registration does not
    /// notify any collaborator.
    pub user_service_url: Option<String>,
    pub user_service_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let jwt_algorithm = env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string());
        let jwt_algorithm = Algorithm::from_str(&jwt_algorithm)
            .with_context(|| format!("JWT_ALGORITHM is not a known algorithm: {jwt_algorithm}"))?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret_key: env::var("JWT_SECRET_KEY").context("JWT_SECRET_KEY must be set")?,
            jwt_algorithm,
            access_token_expire_minutes: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("ACCESS_TOKEN_EXPIRE_MINUTES must be a valid number")?,
            user_service_url: env::var("USER_SERVICE_URL").ok(),
            user_service_timeout_seconds: env::var("USER_SERVICE_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("USER_SERVICE_TIMEOUT_SECONDS must be a valid number")?,
        })
    }
}
