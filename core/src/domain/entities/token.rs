//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Grace period applied to `exp` when verifying tokens (5 minutes)
pub const VERIFICATION_LEEWAY_SECONDS: u64 = 300;

/// Claims carried by both access and refresh tokens.
///
/// The record is fixed: a token whose payload does not decode into these
/// field types is rejected rather than coerced. `id` defaults to empty so a
/// missing subject is reported as a claims problem instead of a format one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID, hyphenated UUID)
    #[serde(default)]
    pub id: String,

    /// Expiration timestamp
    pub exp: i64,

    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// Creates claims for `user_id` issued at `issued_at` and valid for `ttl`
    ///
    /// # Errors
    ///
    /// `TokenError::SigningFailed` when the expiry is not representable.
    pub fn new(user_id: Uuid, issued_at: DateTime<Utc>, ttl: Duration) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::SigningFailed)?;

        Ok(Self {
            id: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Checks the wall clock against `exp`, ignoring any leeway
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Expiry as a timestamp, if representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Gets the user ID from the claims
    ///
    /// # Errors
    ///
    /// * `TokenError::InvalidClaims` - the subject is missing
    /// * `TokenError::MalformedIdentifier` - the subject is not a UUID
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        if self.id.is_empty() {
            return Err(TokenError::InvalidClaims);
        }
        Uuid::parse_str(&self.id).map_err(|_| TokenError::MalformedIdentifier)
    }
}

/// Persisted record of an issued refresh token.
///
/// Only the SHA-256 digest of the token is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// Hex-encoded SHA-256 digest of the token string
    pub token_hash: String,

    /// Timestamp when the token was stored
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Creates a new record expiring at `expires_at`
    pub fn new(user_id: Uuid, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: Utc::now(),
            expires_at,
        }
    }

    /// Checks if the stored token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}
