use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::auth::models::User;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,   // Subject (user id as string)
    pub phone: String, // Phone number
    pub name: String,  // Display name
    pub exp: i64,      // Expiration timestamp
    pub iat: i64,      // Issued at timestamp
    pub jti: String,   // JWT ID (unique token identifier)
}

/// Token Service - creates and verifies access tokens
///
/// Tokens are stateless bearer credentials; expiry is the only destruction
/// mechanism. Secret, algorithm and TTL come from configuration.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: chrono::Duration,
}

impl TokenService {
    pub fn new(secret: &str, algorithm: Algorithm, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            ttl: chrono::Duration::minutes(ttl_minutes),
        }
    }

    /// Mint a fresh access token for a user
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let exp = now + self.ttl;

        let claims = Claims {
            sub: user.id.to_string(),
            phone: user.phone_number.clone(),
            name: user.name.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
    }

    /// Verify and decode an access token
    ///
    /// Returns claims if the token is valid and not expired. No endpoint in
    /// this service consumes tokens; this is here for tests and for any
    /// in-process verifier a later deployment adds.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(self.algorithm);
        decode::<Claims>(token, &self.decoding_key, &validation).map(|data| data.claims)
    }
}
