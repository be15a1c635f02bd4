//! Encrypted Netlify access tokens keyed by Mattermost user.

use crate::crypto::TokenCipher;
use crate::{AppError, Result};

use super::kv::{KvKind, KvStore};

const TOKEN_KEY_SUFFIX: &str = "_netlifyToken";

/// Storage key for a user's access token.
#[must_use]
pub fn token_key(user_id: &str) -> String {
    format!("{user_id}{TOKEN_KEY_SUFFIX}")
}

/// Repository for per-user Netlify access tokens.
///
/// Tokens are sealed with [`TokenCipher`] before they reach the store.
#[derive(Clone)]
pub struct TokenRepo {
    kv: KvStore,
    cipher: TokenCipher,
}

impl TokenRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(kv: KvStore, cipher: TokenCipher) -> Self {
        Self { kv, cipher }
    }

    /// Encrypt and store `token` for `user_id`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Crypto` if encryption fails or `AppError::Db` if
    /// the write fails.
    pub async fn store(&self, user_id: &str, token: &str) -> Result<()> {
        let sealed = self.cipher.encrypt(token)?;
        self.kv
            .set(KvKind::Token, &token_key(user_id), sealed.as_bytes())
            .await
    }

    /// Decrypted access token for `user_id`, or `None` when not connected.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the read fails or `AppError::Crypto` if the
    /// stored value cannot be decrypted.
    pub async fn get(&self, user_id: &str) -> Result<Option<String>> {
        let Some(raw) = self.kv.get(&token_key(user_id)).await? else {
            return Ok(None);
        };
        let sealed = String::from_utf8(raw)
            .map_err(|err| AppError::Crypto(format!("stored token is not UTF-8: {err}")))?;
        self.cipher.decrypt(&sealed).map(Some)
    }

    /// Remove the token for `user_id`. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn delete(&self, user_id: &str) -> Result<bool> {
        self.kv.delete(&token_key(user_id)).await
    }
}
