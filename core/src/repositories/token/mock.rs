//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::domain::entities::user::Role;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository for testing
#[derive(Clone, Default)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshTokenRecord>>>,
    roles: Arc<RwLock<HashMap<Uuid, HashSet<Role>>>>,
    fail_writes: bool,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository whose saves always fail
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Grant a role to a user
    pub async fn grant(&self, user_id: Uuid, role: Role) {
        self.roles.write().await.entry(user_id).or_default().insert(role);
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    async fn has_role(&self, user_id: Uuid, role: Role) -> bool {
        self.roles
            .read()
            .await
            .get(&user_id)
            .map_or(false, |roles| roles.contains(&role))
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(
        &self,
        record: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        if self.fail_writes {
            return Err(DomainError::Repository {
                message: "write rejected".to_string(),
            });
        }

        let mut tokens = self.tokens.write().await;

        // Check for duplicate
        if tokens.contains_key(&record.token_hash) {
            return Err(DomainError::Validation {
                message: "Token already exists".to_string(),
            });
        }

        tokens.insert(record.token_hash.clone(), record.clone());
        Ok(record)
    }

    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }

    async fn delete_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, record| record.user_id != user_id);

        Ok(initial_count - tokens.len())
    }

    async fn delete_expired_tokens(&self) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let initial_count = tokens.len();

        tokens.retain(|_, record| !record.is_expired());

        Ok(initial_count - tokens.len())
    }

    async fn check_admin(&self, user_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.has_role(user_id, Role::Admin).await)
    }

    async fn check_worker(&self, user_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.has_role(user_id, Role::Worker).await)
    }
}
