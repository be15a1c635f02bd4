//! Unit tests for Netlify webhook signature verification.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mattermost_netlify::netlify::signature::{sign, verify};
use mattermost_netlify::AppError;

const BODY: &[u8] = br#"{"name":"docs","build_id":"b1"}"#;

#[test]
fn signed_body_verifies() {
    let token = sign(BODY, "hook-secret").expect("sign");
    verify(&token, BODY, "hook-secret").expect("valid signature");
}

#[test]
fn wrong_secret_is_rejected() {
    let token = sign(BODY, "hook-secret").expect("sign");
    let err = verify(&token, BODY, "other-secret").expect_err("must fail");
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[test]
fn tampered_body_is_rejected() {
    let token = sign(BODY, "hook-secret").expect("sign");
    let err = verify(&token, br#"{"name":"evil"}"#, "hook-secret").expect_err("must fail");
    assert!(matches!(err, AppError::Unauthorized(msg) if msg.contains("does not match")));
}

#[test]
fn malformed_tokens_are_rejected() {
    for token in ["", "abc", "a.b", "a.b.c.d", "!!.??.**"] {
        let err = verify(token, BODY, "hook-secret").expect_err(token);
        assert!(matches!(err, AppError::Unauthorized(_)), "{token}");
    }
}

fn token_with(algorithm: Algorithm, issuer: &str) -> String {
    let claims = serde_json::json!({
        "iss": issuer,
        "sha256": mattermost_netlify::crypto::sha256_hex(BODY),
    });
    encode(
        &Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(b"hook-secret"),
    )
    .expect("encode")
}

#[test]
fn foreign_issuer_is_rejected() {
    let token = token_with(Algorithm::HS256, "someone-else");
    let err = verify(&token, BODY, "hook-secret").expect_err("must fail");
    assert!(matches!(err, AppError::Unauthorized(msg) if msg.contains("issuer")));
}

#[test]
fn other_algorithms_are_rejected() {
    let token = token_with(Algorithm::HS512, "netlify");
    let err = verify(&token, BODY, "hook-secret").expect_err("must fail");
    assert!(matches!(err, AppError::Unauthorized(msg) if msg.contains("algorithm")));
}

#[test]
fn token_without_expiry_is_accepted() {
    let token = token_with(Algorithm::HS256, "netlify");
    verify(&token, BODY, "hook-secret").expect("no exp claim required");
}
