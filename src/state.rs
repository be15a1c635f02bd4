//! Shared application state handed to every HTTP handler.

use std::sync::Arc;

use crate::config::GlobalConfig;
use crate::crypto::{derive_action_secret, TokenCipher};
use crate::mattermost::client::MattermostService;
use crate::netlify::oauth::NetlifyOAuth;
use crate::netlify::NetlifyClient;
use crate::persistence::db::Database;
use crate::persistence::kv::KvStore;
use crate::persistence::state_repo::StateRepo;
use crate::persistence::subscription_repo::SubscriptionRepo;
use crate::persistence::token_repo::TokenRepo;
use crate::Result;

/// Services and repositories shared across requests.
pub struct AppState {
    /// Validated configuration with credentials loaded.
    pub config: Arc<GlobalConfig>,
    /// Database pool.
    pub db: Arc<Database>,
    /// Bot-authenticated Mattermost client.
    pub mattermost: Arc<MattermostService>,
    /// Netlify REST client.
    pub netlify: NetlifyClient,
    /// Netlify OAuth client.
    pub oauth: NetlifyOAuth,
    /// Per-user access tokens.
    pub tokens: TokenRepo,
    /// Pending OAuth states.
    pub states: StateRepo,
    /// Site subscriptions.
    pub subscriptions: SubscriptionRepo,
    /// Secret embedded in interactive message contexts.
    pub action_secret: String,
}

impl AppState {
    /// Assemble the state from its external dependencies.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Crypto` if the encryption key is unusable and
    /// `AppError::Config` or `AppError::Netlify` if a client cannot be built.
    pub fn new(
        config: Arc<GlobalConfig>,
        db: Arc<Database>,
        mattermost: Arc<MattermostService>,
    ) -> Result<Self> {
        let cipher = TokenCipher::new(&config.encryption_key)?;
        let action_secret = derive_action_secret(&config.encryption_key)?;
        let kv = KvStore::new(Arc::clone(&db));

        Ok(Self {
            netlify: NetlifyClient::new(&config.netlify.api_url)?,
            oauth: NetlifyOAuth::new(&config)?,
            tokens: TokenRepo::new(kv.clone(), cipher),
            states: StateRepo::new(kv.clone(), config.oauth_state_ttl_seconds),
            subscriptions: SubscriptionRepo::new(kv),
            action_secret,
            config,
            db,
            mattermost,
        })
    }
}
