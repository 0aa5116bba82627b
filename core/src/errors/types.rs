//! Error types for token handling and authentication
//!
//! Each variant maps to a stable error code so an API layer can answer
//! without inspecting messages.

use storefront_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Password hashing failed")]
    PasswordHashing,
}

/// Token-related errors
///
/// `TokenExpired` is kept apart from every other verification failure so
/// callers can offer a refresh instead of forcing a new log-in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signing failed")]
    SigningFailed,

    #[error("Invalid signing key")]
    InvalidSigningKey,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Unexpected token signing algorithm")]
    InvalidAlgorithm,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Invalid refresh token claims")]
    InvalidClaims,

    #[error("Malformed user identifier in token")]
    MalformedIdentifier,

    #[error("Token user mismatch")]
    UserMismatch,

    #[error("Token revoked")]
    TokenRevoked,
}

impl TokenError {
    /// True only for the expiry outcome
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::TokenExpired)
    }

    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::SigningFailed | TokenError::InvalidSigningKey => {
                error_codes::TOKEN_GENERATION_FAILED
            }
            TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
            TokenError::InvalidTokenFormat => error_codes::TOKEN_INVALID,
            TokenError::InvalidSignature => error_codes::TOKEN_SIGNATURE_INVALID,
            TokenError::InvalidAlgorithm => error_codes::TOKEN_ALGORITHM_INVALID,
            TokenError::InvalidRefreshToken => error_codes::REFRESH_TOKEN_INVALID,
            TokenError::InvalidClaims => error_codes::CLAIMS_INVALID,
            TokenError::MalformedIdentifier => error_codes::IDENTIFIER_MALFORMED,
            TokenError::UserMismatch => error_codes::TOKEN_USER_MISMATCH,
            TokenError::TokenRevoked => error_codes::TOKEN_REVOKED,
        }
    }
}

impl AuthError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::UserAlreadyExists => error_codes::USER_ALREADY_EXISTS,
            AuthError::InsufficientPermissions => error_codes::FORBIDDEN,
            AuthError::PasswordHashing => error_codes::INTERNAL_ERROR,
        }
    }
}

impl IntoErrorResponse for TokenError {
    fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.code(), self.to_string());
        if self.is_expired() {
            response.add_detail("refreshable", true)
        } else {
            response
        }
    }
}

impl IntoErrorResponse for AuthError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.to_string())
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        err.to_error_response()
    }
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        err.to_error_response()
    }
}
