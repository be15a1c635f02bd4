//! Access-token encryption and shared-secret derivation.
//!
//! Tokens are sealed with AES-256-GCM. The 32-byte key is the SHA-256
//! digest of the configured encryption key, so operators may supply a key
//! of any length. Sealed values are URL-safe base64 of `nonce || ciphertext`.

use std::fmt;

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

const NONCE_LEN: usize = 12;
const ACTION_SECRET_LABEL: &[u8] = b"mattermost-netlify/interactive-action";

/// Symmetric cipher for access tokens at rest.
#[derive(Clone)]
pub struct TokenCipher {
    key: [u8; 32],
}

impl fmt::Debug for TokenCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenCipher([REDACTED])")
    }
}

impl TokenCipher {
    /// Derive a cipher from the configured encryption key.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Crypto` if the key is empty.
    pub fn new(encryption_key: &str) -> Result<Self> {
        if encryption_key.is_empty() {
            return Err(AppError::Crypto("encryption key must not be empty".into()));
        }
        let digest = Sha256::digest(encryption_key.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Ok(Self { key })
    }

    /// Encrypt `plaintext` with a fresh random nonce.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Crypto` if encryption fails.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|err| AppError::Crypto(format!("invalid AES key: {err}")))?;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|err| AppError::Crypto(format!("encryption failed: {err}")))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(URL_SAFE.encode(sealed))
    }

    /// Decrypt a value produced by [`TokenCipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::Crypto` if the value is malformed or was sealed
    /// with a different key.
    pub fn decrypt(&self, sealed: &str) -> Result<String> {
        let raw = URL_SAFE
            .decode(sealed.trim())
            .map_err(|err| AppError::Crypto(format!("invalid base64: {err}")))?;
        if raw.len() <= NONCE_LEN {
            return Err(AppError::Crypto("sealed value is too short".into()));
        }
        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);

        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|err| AppError::Crypto(format!("invalid AES key: {err}")))?;
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| {
                AppError::Crypto(
                    "decryption failed; this can happen when the encryption key was changed"
                        .into(),
                )
            })?;

        String::from_utf8(plaintext)
            .map_err(|err| AppError::Crypto(format!("decrypted token is not UTF-8: {err}")))
    }
}

/// Derive the secret embedded in interactive message contexts.
///
/// Derived rather than copied so the encryption key never travels inside
/// chat message props.
///
/// # Errors
///
/// Returns `AppError::Crypto` if the key is empty.
pub fn derive_action_secret(encryption_key: &str) -> Result<String> {
    if encryption_key.is_empty() {
        return Err(AppError::Crypto("encryption key must not be empty".into()));
    }
    let mut mac = <HmacSha256 as Mac>::new_from_slice(encryption_key.as_bytes())
        .map_err(|err| AppError::Crypto(format!("invalid HMAC key: {err}")))?;
    mac.update(ACTION_SECRET_LABEL);
    Ok(format!("{:x}", mac.finalize().into_bytes()))
}

/// Random 32-byte key, base64 encoded, for use as an encryption key or
/// webhook secret.
#[must_use]
pub fn generate_secret() -> String {
    STANDARD.encode(Aes256Gcm::generate_key(OsRng))
}

/// Compute the SHA-256 hex digest of the given bytes.
#[must_use]
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
