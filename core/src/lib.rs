//! # Storefront Core
//!
//! Core authentication layer for the Storefront backend.
//! This crate contains the token provider (JWT issuance, verification and
//! refresh), the authentication service built on top of it, repository
//! interfaces for token and user persistence, and the error types shared by
//! all of them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Claims, NewUser, RefreshTokenRecord, Role, Session, TokenPair, User};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{TokenRepository, UserRepository};
pub use services::{AuthService, AuthServiceConfig, TokenProvider, TokenProviderConfig};
