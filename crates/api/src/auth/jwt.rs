//! Bearer tokens accepted by the write endpoints.
//!
//! Tokens are minted by the identity service that fronts this API and share
//! its `JWT_SECRET`. This crate only verifies them: the signature must be
//! HS256 under that secret, the token must not be expired, and the `role`
//! claim decides whether the caller may write (see
//! [`crate::middleware::rbac`]). [`issue_token`] exists for that identity
//! service's tooling and for tests.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use traffic_core::types::DbId;
use uuid::Uuid;

/// Claims carried by every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The caller's user id in the identity service.
    pub sub: DbId,
    /// Role name; only `admin` may write.
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Token id, logged by the identity service.
    pub jti: String,
}

/// Shared secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of tokens minted by [`issue_token`], in minutes.
    pub token_ttl_mins: i64,
}

const DEFAULT_TOKEN_TTL_MINS: i64 = 15;

impl JwtConfig {
    /// Read `JWT_SECRET` (required) and `JWT_ACCESS_EXPIRY_MINS`
    /// (default `15`).
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let token_ttl_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_TOKEN_TTL_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            token_ttl_mins,
        }
    }
}

/// Mint a token for `user_id` with the given role.
pub fn issue_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: now + config.token_ttl_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature, algorithm and expiry, and return the claims.
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}
