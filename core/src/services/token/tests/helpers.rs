//! Shared fixtures for token provider tests

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::services::token::{TokenProvider, TokenProviderConfig};

pub const TEST_KEY: &[u8] = b"test-signing-key";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn provider_with_key(key: &[u8]) -> TokenProvider {
    init_tracing();
    let config = TokenProviderConfig::new(key, Duration::minutes(15), Duration::days(7));
    TokenProvider::new(config).expect("Failed to create token provider")
}

pub fn provider() -> TokenProvider {
    provider_with_key(TEST_KEY)
}

/// Claims for `user_id` whose `exp` lies `seconds_ago` in the past
pub fn expired_claims(user_id: Uuid, seconds_ago: i64) -> Claims {
    let exp = Utc::now() - Duration::seconds(seconds_ago);
    Claims {
        id: user_id.to_string(),
        iat: (exp - Duration::minutes(15)).timestamp(),
        exp: exp.timestamp(),
    }
}

/// Builds a compact JWT from raw JSON segments without signing it
pub fn forge(header: serde_json::Value, payload: serde_json::Value, signature: &str) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(payload.to_string()),
        signature
    )
}

/// Replaces the signature segment of a token
pub fn tamper_signature(token: &str) -> String {
    let (unsigned, _) = token.rsplit_once('.').expect("token has three segments");
    format!("{}.{}", unsigned, URL_SAFE_NO_PAD.encode(b"forged signature bytes"))
}
