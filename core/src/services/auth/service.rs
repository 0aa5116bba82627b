//! Main authentication service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, RefreshTokenRecord, TokenPair};
use crate::domain::entities::user::{NewUser, Role, User};
use crate::domain::value_objects::Session;
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenProvider;

use super::config::AuthServiceConfig;

/// Hex-encoded SHA-256 digest under which a refresh token is stored
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Authentication service tying the token provider to the token and user stores
pub struct AuthService<T, U>
where
    T: TokenRepository,
    U: UserRepository,
{
    /// Refresh token store, also the revocation authority
    token_repository: Arc<T>,
    /// User repository for credential lookups
    user_repository: Arc<U>,
    /// Stateless JWT provider
    token_provider: Arc<TokenProvider>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<T, U> AuthService<T, U>
where
    T: TokenRepository,
    U: UserRepository,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `token_repository` - Store of issued refresh tokens and roles
    /// * `user_repository` - Repository for user data persistence
    /// * `token_provider` - Provider used to issue and verify JWTs
    /// * `config` - Service configuration
    pub fn new(
        token_repository: Arc<T>,
        user_repository: Arc<U>,
        token_provider: Arc<TokenProvider>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            token_repository,
            user_repository,
            token_provider,
            config,
        }
    }

    /// Register a new user
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The stored user, password hashed with bcrypt
    /// * `Err(DomainError::Validation)` - Malformed mail, short password or
    ///   registration closed
    /// * `Err(AuthError::UserAlreadyExists)` - Mail already registered
    pub async fn sign_up(&self, new_user: NewUser) -> DomainResult<User> {
        if !self.config.allow_registration {
            return Err(DomainError::Validation {
                message: "Registration is closed".to_string(),
            });
        }

        let mail = new_user.mail.trim().to_lowercase();
        if mail.is_empty() || !mail.contains('@') {
            return Err(DomainError::Validation {
                message: "Invalid mail address".to_string(),
            });
        }
        if new_user.password.chars().count() < self.config.min_password_length {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }

        if self.user_repository.exists_by_mail(&mail).await? {
            tracing::info!("Sign-up rejected, mail already registered");
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = bcrypt::hash(&new_user.password, self.config.bcrypt_cost).map_err(
            |err| {
                tracing::error!(error = %err, "Failed to hash password");
                AuthError::PasswordHashing
            },
        )?;

        let user = self
            .user_repository
            .create(User::new(new_user.name, mail, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "User signed up");
        Ok(user)
    }

    /// Check credentials and issue a token pair
    ///
    /// The refresh token's digest is persisted so it can later be revoked.
    /// Unknown mail and wrong password are indistinguishable to the caller.
    pub async fn log_in(&self, mail: &str, password: &str) -> DomainResult<TokenPair> {
        let mail = mail.trim().to_lowercase();

        let user = match self.user_repository.find_by_mail(&mail).await? {
            Some(user) => user,
            None => {
                tracing::info!("Log-in failed, unknown mail");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let matches = bcrypt::verify(password, &user.password_hash).map_err(|err| {
            tracing::error!(user_id = %user.id, error = %err, "Stored password hash unreadable");
            AuthError::PasswordHashing
        })?;
        if !matches {
            tracing::info!(user_id = %user.id, "Log-in failed, wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let pair = self.token_provider.generate_tokens(user.id)?;
        let expires_at = Utc::now()
            .checked_add_signed(self.token_provider.config().refresh_token_ttl)
            .ok_or(TokenError::SigningFailed)?;
        self.store_refresh_token(user.id, &pair.refresh_token, expires_at).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }

    /// Persist the digest of a freshly issued refresh token.
    ///
    /// Two log-ins within the same second yield the identical token, so a
    /// failed save whose digest is already stored for this user counts as
    /// stored.
    pub(super) async fn store_refresh_token(
        &self,
        user_id: Uuid,
        refresh_token: &str,
        expires_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let token_hash = hash_token(refresh_token);
        let record = RefreshTokenRecord::new(user_id, token_hash.clone(), expires_at);

        match self.token_repository.save_refresh_token(record).await {
            Ok(_) => Ok(()),
            Err(err) => match self.token_repository.find_refresh_token(&token_hash).await {
                Ok(Some(existing)) if existing.user_id == user_id => {
                    tracing::debug!(%user_id, "Refresh token already stored");
                    Ok(())
                }
                _ => Err(err),
            },
        }
    }

    /// Revoke every refresh token of the user owning `refresh_token`
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of stored tokens deleted
    pub async fn log_out(&self, refresh_token: &str) -> DomainResult<usize> {
        let user_id = self.verify_refresh_token(refresh_token).await?;
        let deleted = self.token_repository.delete_user_tokens(user_id).await?;

        tracing::info!(%user_id, deleted, "User logged out");
        Ok(deleted)
    }

    /// Verify an access token
    pub fn verify_access_token(&self, token: &str) -> DomainResult<Claims> {
        Ok(self.token_provider.verify_token(token)?)
    }

    /// Verify a refresh token against both its signature and the store
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - Owner of the token
    /// * `Err(TokenError::InvalidRefreshToken)` - Signature, format or expiry check failed
    /// * `Err(TokenError::TokenRevoked)` - Well signed but no longer stored
    /// * `Err(TokenError::UserMismatch)` - Stored for a different user
    pub async fn verify_refresh_token(&self, token: &str) -> DomainResult<Uuid> {
        let claims = self.token_provider.verify_token(token).map_err(|err| {
            tracing::debug!(error = %err, "Refresh token rejected");
            TokenError::InvalidRefreshToken
        })?;
        let user_id = claims.user_id()?;

        let record = match self
            .token_repository
            .find_refresh_token(&hash_token(token))
            .await?
        {
            Some(record) => record,
            None => {
                tracing::warn!(%user_id, "Refresh token not in store");
                return Err(TokenError::TokenRevoked.into());
            }
        };

        if record.user_id != user_id {
            tracing::warn!(%user_id, stored_user = %record.user_id, "Refresh token stored for another user");
            return Err(TokenError::UserMismatch.into());
        }

        Ok(user_id)
    }

    /// Issue a new access token after confirming the refresh token is still stored
    pub async fn refresh_token(&self, access_token: &str, refresh_token: &str) -> DomainResult<String> {
        self.verify_refresh_token(refresh_token).await?;
        Ok(self
            .token_provider
            .refresh_access_token(access_token, refresh_token)?)
    }

    /// Resolve the caller behind a token pair
    ///
    /// A valid access token is enough. An expired one is renewed through the
    /// store-checked refresh path and handed back in the session; any other
    /// access token failure is returned as is.
    pub async fn verify_session(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> DomainResult<Session> {
        match self.token_provider.verify_token(access_token) {
            Ok(claims) => Ok(Session::new(claims.user_id()?)),
            Err(TokenError::TokenExpired) => {
                let user_id = self.verify_refresh_token(refresh_token).await?;
                let renewed = self
                    .token_provider
                    .refresh_access_token(access_token, refresh_token)?;

                tracing::debug!(%user_id, "Session renewed");
                Ok(Session::renewed(user_id, renewed))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Whether the user is an administrator
    pub async fn check_admin(&self, user_id: Uuid) -> DomainResult<bool> {
        self.token_repository.check_admin(user_id).await
    }

    /// Whether the user is a worker
    pub async fn check_worker(&self, user_id: Uuid) -> DomainResult<bool> {
        self.token_repository.check_worker(user_id).await
    }

    /// Resolve the session and require `role`
    pub async fn authorize(
        &self,
        access_token: &str,
        refresh_token: &str,
        role: Role,
    ) -> DomainResult<Session> {
        let session = self.verify_session(access_token, refresh_token).await?;

        let allowed = match role {
            Role::Admin => self.check_admin(session.user_id).await?,
            Role::Worker => self.check_worker(session.user_id).await?,
        };
        if !allowed {
            tracing::warn!(user_id = %session.user_id, %role, "Role check failed");
            return Err(AuthError::InsufficientPermissions.into());
        }

        Ok(session)
    }

    /// Unverified user ID carried by a token, for logging and hints only
    pub fn user_id_hint(&self, token: &str) -> DomainResult<Uuid> {
        Ok(self.token_provider.extract_user_id_unverified(token)?)
    }

    /// Drop expired refresh token records from the store
    pub async fn cleanup_expired_tokens(&self) -> DomainResult<usize> {
        let deleted = self.token_repository.delete_expired_tokens().await?;
        if deleted > 0 {
            tracing::info!(deleted, "Removed expired refresh tokens");
        }
        Ok(deleted)
    }
}
