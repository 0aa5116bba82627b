//! User repository trait defining the lookups the authentication layer needs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User persistence operations used by authentication
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g., duplicate mail)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Find a user by their ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by mail address
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with this mail
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_mail(&self, mail: &str) -> Result<Option<User>, DomainError>;

    /// Check whether a mail address is already registered
    async fn exists_by_mail(&self, mail: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_mail(mail).await?.is_some())
    }
}
