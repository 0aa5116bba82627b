//! Configuration for the token provider

use chrono::Duration;
use storefront_shared::config::JwtConfig;

/// Configuration for the token provider
///
/// Fixed for the provider's lifetime.
#[derive(Clone)]
pub struct TokenProviderConfig {
    /// Shared HMAC signing key
    pub signing_key: Vec<u8>,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
}

impl TokenProviderConfig {
    /// Creates a configuration from a key and both lifetimes
    pub fn new(
        signing_key: impl Into<Vec<u8>>,
        access_token_ttl: Duration,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            signing_key: signing_key.into(),
            access_token_ttl,
            refresh_token_ttl,
        }
    }
}

// Out-of-range lifetimes saturate; issuing with them then fails instead of panicking.
fn ttl_from_seconds(seconds: i64) -> Duration {
    Duration::try_seconds(seconds).unwrap_or(if seconds < 0 {
        Duration::MIN
    } else {
        Duration::MAX
    })
}

impl From<&JwtConfig> for TokenProviderConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            signing_key: config.secret.as_bytes().to_vec(),
            access_token_ttl: ttl_from_seconds(config.access_token_expiry),
            refresh_token_ttl: ttl_from_seconds(config.refresh_token_expiry),
        }
    }
}

impl Default for TokenProviderConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

// The key never reaches logs.
impl std::fmt::Debug for TokenProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProviderConfig")
            .field("signing_key", &"<redacted>")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish()
    }
}
