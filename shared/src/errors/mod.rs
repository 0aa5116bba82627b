//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }

    /// HTTP status code suggested for this error code
    pub fn status(&self) -> u16 {
        error_codes::status_for(&self.error)
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const USER_ALREADY_EXISTS: &str = "USER_ALREADY_EXISTS";
    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
    pub const TOKEN_SIGNATURE_INVALID: &str = "TOKEN_SIGNATURE_INVALID";
    pub const TOKEN_ALGORITHM_INVALID: &str = "TOKEN_ALGORITHM_INVALID";
    pub const TOKEN_GENERATION_FAILED: &str = "TOKEN_GENERATION_FAILED";
    pub const TOKEN_REVOKED: &str = "TOKEN_REVOKED";
    pub const TOKEN_USER_MISMATCH: &str = "TOKEN_USER_MISMATCH";
    pub const REFRESH_TOKEN_INVALID: &str = "REFRESH_TOKEN_INVALID";
    pub const CLAIMS_INVALID: &str = "CLAIMS_INVALID";
    pub const IDENTIFIER_MALFORMED: &str = "IDENTIFIER_MALFORMED";

    /// Map an error code to the HTTP status an API layer should answer with
    pub fn status_for(code: &str) -> u16 {
        match code {
            BAD_REQUEST | VALIDATION_ERROR => 400,
            UNAUTHORIZED | INVALID_CREDENTIALS | TOKEN_EXPIRED | TOKEN_INVALID
            | TOKEN_SIGNATURE_INVALID | TOKEN_ALGORITHM_INVALID | TOKEN_REVOKED
            | TOKEN_USER_MISMATCH | REFRESH_TOKEN_INVALID | CLAIMS_INVALID
            | IDENTIFIER_MALFORMED => 401,
            FORBIDDEN => 403,
            NOT_FOUND => 404,
            CONFLICT | USER_ALREADY_EXISTS => 409,
            _ => 500,
        }
    }
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}
