//! Configuration for the authentication service

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
    /// Shortest password accepted at sign-up
    pub min_password_length: usize,
    /// Whether to allow registration of new users
    pub allow_registration: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            min_password_length: 8,
            allow_registration: true,
        }
    }
}
