//! Shared utilities and common types for Storefront server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (JWT, environment, logging)
//! - Error response structures and error codes

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{AuthConfig, Environment, JwtConfig, LoggingConfig};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
