//! Authentication service module
//!
//! Sign-up and log-in with bcrypt password hashes, plus the session checks
//! that combine the stateless token provider with the refresh token store:
//! - Store-checked refresh and log-out
//! - Transparent renewal of expired access tokens
//! - Role checks for administrators and workers

mod config;
mod service;


pub use config::AuthServiceConfig;
pub use service::{hash_token, AuthService};
