//! Token provider module for JWT management
//!
//! This module handles the stateless token operations:
//! - Paired access/refresh token issuance (HS256)
//! - Verification with a five minute expiry leeway
//! - Access token renewal from a refresh token
//! - Unverified identity extraction for hints and logging

mod config;
mod provider;

#[cfg(test)]
mod tests;

pub use config::TokenProviderConfig;
pub use provider::TokenProvider;
