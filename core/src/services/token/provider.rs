//! Stateless JWT provider

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair, VERIFICATION_LEEWAY_SECONDS};
use crate::errors::TokenError;

use super::config::TokenProviderConfig;

/// Subject-only view of a payload; timestamps are irrelevant when nothing is verified.
#[derive(Deserialize)]
struct UnverifiedSubject {
    #[serde(default)]
    id: String,
}

/// Issues, verifies and renews HMAC-signed JWTs.
///
/// Holds no mutable state after construction; a single instance can be
/// shared across threads without locking. Revocation is not its concern:
/// a well-signed token that was deleted from the token store still verifies
/// here, so callers must consult the store as well.
pub struct TokenProvider {
    config: TokenProviderConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    unverified: Validation,
}

impl TokenProvider {
    /// Creates a new token provider
    ///
    /// # Errors
    ///
    /// `TokenError::InvalidSigningKey` when the key is empty.
    pub fn new(config: TokenProviderConfig) -> Result<Self, TokenError> {
        if config.signing_key.is_empty() {
            return Err(TokenError::InvalidSigningKey);
        }

        let encoding_key = EncodingKey::from_secret(&config.signing_key);
        let decoding_key = DecodingKey::from_secret(&config.signing_key);

        // Any HMAC variant is accepted; asymmetric or unknown algorithms are not.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = VERIFICATION_LEEWAY_SECONDS;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        let mut unverified = Validation::new(Algorithm::HS256);
        unverified.insecure_disable_signature_validation();
        unverified.validate_exp = false;
        unverified.validate_aud = false;
        unverified.required_spec_claims.clear();

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            unverified,
        })
    }

    /// Provider configuration
    pub fn config(&self) -> &TokenProviderConfig {
        &self.config
    }

    /// Generates a new access/refresh token pair for a user
    ///
    /// Both tokens share one issuance instant and differ only in expiry.
    ///
    /// # Errors
    ///
    /// `TokenError::SigningFailed` if either token cannot be signed or its
    /// expiry overflows; no partial pair is returned.
    pub fn generate_tokens(&self, user_id: Uuid) -> Result<TokenPair, TokenError> {
        let now = Utc::now();

        let access_token = self.sign(&Claims::new(user_id, now, self.config.access_token_ttl)?)?;
        let refresh_token =
            self.sign(&Claims::new(user_id, now, self.config.refresh_token_ttl)?)?;

        tracing::debug!(%user_id, "Issued token pair");

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.config.access_token_ttl.num_seconds(),
            refresh_expires_in: self.config.refresh_token_ttl.num_seconds(),
        })
    }

    /// Generates the access half of a pair
    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.sign(&Claims::new(
            user_id,
            Utc::now(),
            self.config.access_token_ttl,
        )?)
    }

    /// Verifies a token and returns its claims
    ///
    /// A token up to five minutes past `exp` still verifies; use
    /// [`Claims::is_expired`] to see whether the clock has passed it.
    ///
    /// # Errors
    ///
    /// * `TokenError::TokenExpired` - correctly signed but beyond the leeway
    /// * `TokenError::InvalidSignature` - signed with another key
    /// * `TokenError::InvalidAlgorithm` - not an HMAC algorithm
    /// * `TokenError::InvalidTokenFormat` - anything else (empty, garbled,
    ///   wrong claim types, missing `exp`)
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => TokenError::InvalidAlgorithm,
                _ => TokenError::InvalidTokenFormat,
            })
    }

    /// Returns `Ok(true)` for a valid token, otherwise the verification error
    pub fn is_valid(&self, token: &str) -> Result<bool, TokenError> {
        self.verify_token(token).map(|_| true)
    }

    /// Issues a new access token from a refresh token
    ///
    /// The refresh token is not rotated; only a new access token is
    /// returned, bound to the refresh token's subject.
    ///
    /// # Errors
    ///
    /// * `TokenError::InvalidRefreshToken` - refresh token fails verification
    /// * `TokenError::InvalidClaims` - refresh token carries no subject
    /// * `TokenError::MalformedIdentifier` - a subject is not a UUID
    /// * `TokenError::UserMismatch` - the access token belongs to someone else
    pub fn refresh_access_token(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<String, TokenError> {
        let refresh_claims = self.verify_token(refresh_token).map_err(|err| {
            tracing::debug!(error = %err, "Refresh token rejected");
            TokenError::InvalidRefreshToken
        })?;
        let user_id = refresh_claims.user_id()?;

        // The access token is usually expired by now, which is why the caller
        // is refreshing. An unreadable one skips the cross-check; a readable
        // one must name the same user.
        match self.verify_token(access_token) {
            Ok(access_claims) if !access_claims.id.is_empty() => {
                let access_user = access_claims.user_id()?;
                if access_user != user_id {
                    tracing::warn!(
                        %user_id,
                        %access_user,
                        "Refresh token presented with another user's access token"
                    );
                    return Err(TokenError::UserMismatch);
                }
            }
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(error = %err, "Access token unreadable, skipping cross-check");
            }
        }

        let token = self.generate_access_token(user_id)?;
        tracing::debug!(%user_id, "Renewed access token");
        Ok(token)
    }

    /// Reads the subject of a token WITHOUT verifying its signature or expiry.
    ///
    /// Anyone can forge the returned identity. Use it for logging or as a
    /// hint only; access control must go through [`Self::verify_token`].
    ///
    /// # Errors
    ///
    /// * `TokenError::InvalidTokenFormat` - the token cannot be decoded
    /// * `TokenError::InvalidClaims` - no subject
    /// * `TokenError::MalformedIdentifier` - subject is not a UUID
    pub fn extract_user_id_unverified(&self, token: &str) -> Result<Uuid, TokenError> {
        let data =
            decode::<UnverifiedSubject>(token, &DecodingKey::from_secret(&[]), &self.unverified)
                .map_err(|_| TokenError::InvalidTokenFormat)?;

        let id = data.claims.id;
        if id.is_empty() {
            return Err(TokenError::InvalidClaims);
        }
        Uuid::parse_str(&id).map_err(|_| TokenError::MalformedIdentifier)
    }

    /// Signs arbitrary claims with the provider key
    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|err| {
            tracing::error!(error = %err, "Failed to sign token");
            TokenError::SigningFailed
        })
    }
}
