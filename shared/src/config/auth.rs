//! Authentication configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::environment::Environment;

const DEFAULT_SECRET: &str = "development-secret-please-change-in-production";

/// Longest accepted token lifetime in seconds (one year)
pub const MAX_TOKEN_EXPIRY: i64 = 365 * 86400;

/// Errors raised while validating configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT secret must not be empty")]
    EmptySecret,

    #[error("The default JWT secret cannot be used in {environment}")]
    DefaultSecretInProduction { environment: Environment },

    #[error("Token expiry must be positive: {field}")]
    NonPositiveExpiry { field: String },

    #[error("Token expiry exceeds {max} seconds: {field}")]
    ExpiryTooLong { field: String, max: i64 },

    #[error("Refresh token must outlive the access token")]
    RefreshShorterThanAccess,
}

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    /// Check the secret and lifetimes for obvious mistakes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if self.access_token_expiry <= 0 {
            return Err(ConfigError::NonPositiveExpiry {
                field: "access_token_expiry".to_string(),
            });
        }
        if self.refresh_token_expiry <= 0 {
            return Err(ConfigError::NonPositiveExpiry {
                field: "refresh_token_expiry".to_string(),
            });
        }
        if self.refresh_token_expiry > MAX_TOKEN_EXPIRY {
            return Err(ConfigError::ExpiryTooLong {
                field: "refresh_token_expiry".to_string(),
                max: MAX_TOKEN_EXPIRY,
            });
        }
        if self.refresh_token_expiry <= self.access_token_expiry {
            return Err(ConfigError::RefreshShorterThanAccess);
        }
        Ok(())
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Environment the service runs in
    #[serde(default)]
    pub environment: Environment,

    /// JWT configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Load the environment-specific `.env` file, then read the process environment.
    ///
    /// A missing `.env` file is not an error; variables already set in the
    /// process take precedence over the file.
    pub fn load() -> Self {
        let environment = Environment::from_env();
        if let Err(err) = dotenvy::from_filename(environment.env_file()) {
            tracing::debug!(file = environment.env_file(), error = %err, "No environment file loaded");
        }
        Self::from_env()
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable source.
    ///
    /// Unparseable lifetimes fall back to the defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = JwtConfig::default();
        let environment = ["ENVIRONMENT", "ENV", "RUST_ENV"]
            .iter()
            .find_map(|key| lookup(key))
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        let secret = lookup("JWT_SECRET").unwrap_or(defaults.secret);
        let access_token_expiry = parse_seconds(
            &lookup,
            "JWT_ACCESS_TOKEN_EXPIRY",
            defaults.access_token_expiry,
        );
        let refresh_token_expiry = parse_seconds(
            &lookup,
            "JWT_REFRESH_TOKEN_EXPIRY",
            defaults.refresh_token_expiry,
        );

        Self {
            environment,
            jwt: JwtConfig {
                secret,
                access_token_expiry,
                refresh_token_expiry,
            },
        }
    }

    /// Validate the JWT settings for the configured environment
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err(ConfigError::DefaultSecretInProduction {
                environment: self.environment,
            });
        }
        if self.jwt.is_using_default_secret() {
            tracing::warn!("Using the default JWT secret; set JWT_SECRET outside development");
        }
        Ok(())
    }
}

fn parse_seconds<F>(lookup: &F, key: &str, default: i64) -> i64
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, default, "Invalid token expiry, using default");
            default
        }),
        None => default,
    }
}
