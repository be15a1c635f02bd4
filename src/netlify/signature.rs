//! Verification of signed Netlify webhooks.
//!
//! Netlify signs outgoing hooks with a JWS (HS256) in `X-Webhook-Signature`.
//! The claims name the issuer and carry the SHA-256 of the request body.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::crypto::sha256_hex;
use crate::{AppError, Result};

const EXPECTED_ISSUER: &str = "netlify";

#[derive(Debug, Serialize, Deserialize)]
struct SignatureClaims {
    iss: String,
    sha256: String,
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    // Netlify tokens carry no expiry.
    validation.validate_exp = false;
    validation.set_required_spec_claims(&["iss"]);
    validation.set_issuer(&[EXPECTED_ISSUER]);
    validation
}

fn map_decode_error(err: &jsonwebtoken::errors::Error) -> AppError {
    match err.kind() {
        ErrorKind::InvalidSignature => AppError::Unauthorized("webhook signature mismatch".into()),
        ErrorKind::InvalidIssuer => AppError::Unauthorized("unexpected webhook issuer".into()),
        ErrorKind::InvalidAlgorithm => {
            AppError::Unauthorized("unsupported signature algorithm".into())
        }
        _ => AppError::Unauthorized("malformed webhook signature".into()),
    }
}

/// Check `signature` against `body` using the shared `secret`.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if the token is malformed, signed with a
/// different secret, issued by someone other than Netlify, or covers a
/// different body.
pub fn verify(signature: &str, body: &[u8], secret: &str) -> Result<()> {
    let decoded = decode::<SignatureClaims>(
        signature.trim(),
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map_err(|err| map_decode_error(&err))?;

    if !decoded.claims.sha256.eq_ignore_ascii_case(&sha256_hex(body)) {
        return Err(AppError::Unauthorized(
            "webhook body does not match its signature".into(),
        ));
    }
    Ok(())
}

/// Produce a signature Netlify would send for `body`.
///
/// # Errors
///
/// Returns `AppError::Crypto` if the token cannot be encoded.
pub fn sign(body: &[u8], secret: &str) -> Result<String> {
    let claims = SignatureClaims {
        iss: EXPECTED_ISSUER.to_owned(),
        sha256: sha256_hex(body),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| AppError::Crypto(format!("failed to sign webhook body: {err}")))
}
