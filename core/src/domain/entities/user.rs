//! User entity as seen by the authentication layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Privileged roles checked through the token store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Store administrator
    Admin,
    /// Warehouse or support worker
    Worker,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Worker => write!(f, "worker"),
        }
    }
}

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Mail address used to log in
    pub mail: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance from an already hashed password
    pub fn new(name: String, mail: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            mail,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Sign-up input carrying the plain-text password
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub mail: String,
    pub password: String,
}
