//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Store of issued refresh tokens plus the role lookups the auth layer needs.
///
/// The store is the revocation authority: the token provider will accept any
/// well-signed refresh token, so callers must also confirm the token is still
/// present here. Deleting a user's records logs that user out everywhere.
///
/// # Security Considerations
/// - Tokens are stored as SHA-256 digests, never in clear
/// - Expired records should be periodically cleaned up
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a newly issued refresh token
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The saved record
    /// * `Err(DomainError)` - Save failed (e.g., duplicate digest)
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::{Duration, Utc};
    /// # use uuid::Uuid;
    /// # use storefront_core::repositories::TokenRepository;
    /// # use storefront_core::domain::entities::token::RefreshTokenRecord;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let record = RefreshTokenRecord::new(
    ///     Uuid::new_v4(),
    ///     "sha256_hex_digest".to_string(),
    ///     Utc::now() + Duration::days(7),
    /// );
    ///
    /// let saved = repo.save_refresh_token(record).await?;
    /// println!("Token stored with ID: {}", saved.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn save_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError>;

    /// Find a stored refresh token by its digest
    ///
    /// # Returns
    /// * `Ok(Some(RefreshTokenRecord))` - Token is known to the store
    /// * `Ok(None)` - Token was never stored or has been deleted
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Delete every stored refresh token of a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    /// * `Err(DomainError)` - Deletion failed
    async fn delete_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete records whose expiry has passed
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of expired records deleted
    async fn delete_expired_tokens(&self) -> Result<usize, DomainError>;

    /// Whether the user holds the administrator role
    async fn check_admin(&self, user_id: Uuid) -> Result<bool, DomainError>;

    /// Whether the user holds the worker role
    async fn check_worker(&self, user_id: Uuid) -> Result<bool, DomainError>;

    /// Check if a token digest is stored and not expired
    async fn is_token_valid(&self, token_hash: &str) -> Result<bool, DomainError> {
        match self.find_refresh_token(token_hash).await? {
            Some(record) => Ok(!record.is_expired()),
            None => Ok(false),
        }
    }
}
