//! Unit tests for access token renewal

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

use super::helpers::{expired_claims, provider, provider_with_key, tamper_signature};

#[test]
fn test_refresh_with_expired_access_token() {
    let provider = provider();
    let user_id = Uuid::new_v4();
    let pair = provider.generate_tokens(user_id).unwrap();
    let stale_access = provider.sign(&expired_claims(user_id, 3600)).unwrap();

    let renewed = provider
        .refresh_access_token(&stale_access, &pair.refresh_token)
        .unwrap();

    let claims = provider.verify_token(&renewed).unwrap();
    assert_eq!(claims.user_id(), Ok(user_id));
    assert_eq!(claims.exp - claims.iat, 15 * 60);
    assert_eq!(provider.extract_user_id_unverified(&renewed), Ok(user_id));
}

#[test]
fn test_refresh_with_valid_access_token_of_same_user() {
    let provider = provider();
    let user_id = Uuid::new_v4();
    let pair = provider.generate_tokens(user_id).unwrap();

    let renewed = provider
        .refresh_access_token(&pair.access_token, &pair.refresh_token)
        .unwrap();
    assert_eq!(provider.verify_token(&renewed).unwrap().user_id(), Ok(user_id));
}

#[test]
fn test_refresh_rejects_user_mismatch() {
    let provider = provider();
    let alice = provider.generate_tokens(Uuid::new_v4()).unwrap();
    let bob = provider.generate_tokens(Uuid::new_v4()).unwrap();

    let result = provider.refresh_access_token(&bob.access_token, &alice.refresh_token);
    assert_eq!(result, Err(TokenError::UserMismatch));
}

#[test]
fn test_refresh_mismatch_within_leeway() {
    // An access token inside the leeway window is still readable and checked.
    let provider = provider();
    let alice = provider.generate_tokens(Uuid::new_v4()).unwrap();
    let bob_access = provider.sign(&expired_claims(Uuid::new_v4(), 60)).unwrap();

    let result = provider.refresh_access_token(&bob_access, &alice.refresh_token);
    assert_eq!(result, Err(TokenError::UserMismatch));
}

#[test]
fn test_refresh_ignores_unreadable_access_token() {
    let provider = provider();
    let user_id = Uuid::new_v4();
    let pair = provider.generate_tokens(user_id).unwrap();

    // Another user's token, but long expired, so no cross-check is possible
    let stale_other = provider.sign(&expired_claims(Uuid::new_v4(), 3600)).unwrap();
    let foreign = provider_with_key(b"another-key")
        .generate_access_token(Uuid::new_v4())
        .unwrap();

    for access in ["", "garbage", stale_other.as_str(), foreign.as_str()] {
        let renewed = provider
            .refresh_access_token(access, &pair.refresh_token)
            .unwrap();
        assert_eq!(provider.verify_token(&renewed).unwrap().user_id(), Ok(user_id));
    }
}

#[test]
fn test_refresh_rejects_corrupted_refresh_token() {
    let provider = provider();
    let pair = provider.generate_tokens(Uuid::new_v4()).unwrap();
    let truncated = &pair.refresh_token[..pair.refresh_token.len() - 5];
    let tampered = tamper_signature(&pair.refresh_token);

    for refresh in [truncated, tampered.as_str(), "", "x.y.z"] {
        for access in [pair.access_token.as_str(), "garbage"] {
            assert_eq!(
                provider.refresh_access_token(access, refresh),
                Err(TokenError::InvalidRefreshToken)
            );
        }
    }
}

#[test]
fn test_refresh_rejects_foreign_and_expired_refresh_tokens() {
    let provider = provider();
    let user_id = Uuid::new_v4();
    let access = provider.generate_access_token(user_id).unwrap();

    let foreign = provider_with_key(b"another-key").generate_tokens(user_id).unwrap();
    assert_eq!(
        provider.refresh_access_token(&access, &foreign.refresh_token),
        Err(TokenError::InvalidRefreshToken)
    );

    let expired = provider.sign(&expired_claims(user_id, 6 * 60)).unwrap();
    assert_eq!(
        provider.refresh_access_token(&access, &expired),
        Err(TokenError::InvalidRefreshToken)
    );
}

#[test]
fn test_refresh_within_leeway_succeeds() {
    let provider = provider();
    let user_id = Uuid::new_v4();
    let refresh = provider.sign(&expired_claims(user_id, 30)).unwrap();

    let renewed = provider.refresh_access_token("", &refresh).unwrap();
    assert_eq!(provider.verify_token(&renewed).unwrap().user_id(), Ok(user_id));
}

#[test]
fn test_refresh_subject_errors() {
    let provider = provider();
    let now = Utc::now();
    let mut claims = Claims::new(Uuid::new_v4(), now, Duration::days(1)).unwrap();

    claims.id = String::new();
    let no_subject = provider.sign(&claims).unwrap();
    assert_eq!(
        provider.refresh_access_token("", &no_subject),
        Err(TokenError::InvalidClaims)
    );

    claims.id = "customer-42".to_string();
    let bad_subject = provider.sign(&claims).unwrap();
    assert_eq!(
        provider.refresh_access_token("", &bad_subject),
        Err(TokenError::MalformedIdentifier)
    );
}

#[test]
fn test_refresh_access_token_subject_errors() {
    let provider = provider();
    let user_id = Uuid::new_v4();
    let pair = provider.generate_tokens(user_id).unwrap();
    let now = Utc::now();

    // Readable access token with a garbled id
    let mut claims = Claims::new(user_id, now, Duration::minutes(15)).unwrap();
    claims.id = "customer-42".to_string();
    let garbled = provider.sign(&claims).unwrap();
    assert_eq!(
        provider.refresh_access_token(&garbled, &pair.refresh_token),
        Err(TokenError::MalformedIdentifier)
    );

    // Readable access token without id: nothing to compare
    claims.id = String::new();
    let anonymous = provider.sign(&claims).unwrap();
    assert!(provider
        .refresh_access_token(&anonymous, &pair.refresh_token)
        .is_ok());
}
