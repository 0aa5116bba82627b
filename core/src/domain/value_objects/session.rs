//! Result of checking a caller's token pair.

use uuid::Uuid;

/// Authenticated session derived from an access/refresh token pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Verified user ID
    pub user_id: Uuid,

    /// New access token when the presented one had expired and was renewed
    pub renewed_access_token: Option<String>,
}

impl Session {
    /// Session backed by a still-valid access token
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            renewed_access_token: None,
        }
    }

    /// Session whose access token had to be renewed
    pub fn renewed(user_id: Uuid, access_token: String) -> Self {
        Self {
            user_id,
            renewed_access_token: Some(access_token),
        }
    }

    /// Whether the caller must replace its access token
    pub fn was_renewed(&self) -> bool {
        self.renewed_access_token.is_some()
    }
}
