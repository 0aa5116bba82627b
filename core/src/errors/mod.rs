//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError};

use storefront_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Repository error: {message}")]
    Repository { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Whether this error is an expired token the caller may refresh
    pub fn is_token_expired(&self) -> bool {
        matches!(self, DomainError::Token(err) if err.is_expired())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
            }
            DomainError::NotFound { resource } => {
                ErrorResponse::new(error_codes::NOT_FOUND, self.to_string())
                    .add_detail("resource", resource)
            }
            // Storage details stay in the logs
            DomainError::Repository { .. } => {
                ErrorResponse::new(error_codes::DATABASE_ERROR, "Storage failure")
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal error")
            }
            DomainError::Auth(err) => err.to_error_response(),
            DomainError::Token(err) => err.to_error_response(),
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        err.to_error_response()
    }
}
