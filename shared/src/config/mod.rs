//! Configuration module
//!
//! - `auth` - JWT signing and token lifetime configuration
//! - `environment` - Environment detection and logging configuration

pub mod auth;
pub mod environment;

pub use auth::{AuthConfig, ConfigError, JwtConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
