//! JWT token issuance and verification
//!
//! Tokens are self-contained HS256 artifacts carrying the owning user id;
//! nothing is persisted server-side and there is no revocation list.
//! Keys are pre-computed once at startup and shared via `AppState`.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Why verification failed.
///
/// The kinds are distinguished here so the failure can be logged
/// precisely, but they must never be distinguishable in an HTTP
/// response: the boundary collapses all of them into one generic 401.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Pre-computed JWT keys, wrapped in Arc for cheap cloning.
/// Derive these once at startup, not per request.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token service: issues and verifies bearer tokens with a fixed TTL.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    token_ttl_secs: i64,
    validation: Validation,
}

impl JwtService {
    /// Create a new token service. Call once at startup and store in
    /// `AppState`; key derivation is not free.
    pub fn new(secret: &str, token_ttl_secs: i64) -> Self {
        // HS256 is the only algorithm ever accepted. Pinning it here
        // closes the algorithm-confusion hole: a token whose header
        // claims any other algorithm fails verification outright.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            keys: JwtKeys::new(secret),
            token_ttl_secs,
            validation,
        }
    }

    /// Issue a token for a user
    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.token_ttl_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.keys.encoding,
        )?)
    }

    /// Verify a token and return its claims.
    ///
    /// Signature integrity is checked before claims are inspected, so a
    /// tampered token is rejected without its payload being trusted.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature
                | ErrorKind::InvalidAlgorithm
                | ErrorKind::InvalidAlgorithmName => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl_secs
    }
}
