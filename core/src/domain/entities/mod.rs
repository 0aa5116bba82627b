//! Domain entities representing core business objects.

pub mod token;
pub mod user;


// Re-export commonly used types
pub use token::{Claims, RefreshTokenRecord, TokenPair, VERIFICATION_LEEWAY_SECONDS};
pub use user::{NewUser, Role, User};
