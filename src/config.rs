//! Global configuration parsing, validation, and credential loading.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::{AppError, Result};

/// Keychain service name under which credentials are looked up.
pub const KEYRING_SERVICE: &str = "mattermost-netlify";

/// Mattermost server connectivity.
///
/// The bot token and slash-command token are loaded at runtime via OS
/// keychain or environment variables, never from the TOML file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct MattermostConfig {
    /// Base URL of the Mattermost server, e.g. `https://chat.example.com`.
    pub server_url: String,
    /// Slash command trigger word without the leading slash.
    #[serde(default = "default_command_trigger")]
    pub command_trigger: String,
    /// Bot access token used for REST calls (populated at runtime).
    #[serde(skip)]
    pub bot_token: String,
    /// Verification token Mattermost sends with each slash command (populated at runtime).
    #[serde(skip)]
    pub command_token: String,
}

/// Netlify OAuth application and API endpoints.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NetlifyConfig {
    /// OAuth client ID generated by Netlify.
    pub client_id: String,
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// OAuth authorize endpoint.
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    /// OAuth token endpoint.
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// OAuth client secret (populated at runtime).
    #[serde(skip)]
    pub client_secret: String,
}

fn default_command_trigger() -> String {
    "netlify".into()
}

fn default_api_url() -> String {
    "https://api.netlify.com/api/v1".into()
}

fn default_auth_url() -> String {
    "https://app.netlify.com/authorize".into()
}

fn default_token_url() -> String {
    "https://api.netlify.com/oauth/token".into()
}

fn default_http_port() -> u16 {
    8085
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data").join("netlify.db")
}

fn default_oauth_state_ttl() -> u64 {
    600
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Externally reachable base URL of this service.
    pub public_url: String,
    /// HTTP port the service listens on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// `SQLite` database file; `:memory:` keeps everything in memory.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Seconds an unused OAuth state stays valid.
    #[serde(default = "default_oauth_state_ttl")]
    pub oauth_state_ttl_seconds: u64,
    /// Optional HTML page shown after a successful OAuth connection.
    #[serde(default)]
    pub auth_redirect_page: Option<PathBuf>,
    /// Mattermost connectivity settings.
    pub mattermost: MattermostConfig,
    /// Netlify OAuth and API settings.
    pub netlify: NetlifyConfig,
    /// Key from which the token cipher and the action secret are derived (populated at runtime).
    #[serde(skip)]
    pub encryption_key: String,
    /// Secret used to verify signed Netlify webhooks; empty disables verification.
    #[serde(skip)]
    pub webhook_secret: String,
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and normalize URLs.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load secrets from OS keychain with env-var fallback.
    ///
    /// The webhook secret is optional; every other credential is required.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a required credential is found in
    /// neither the keychain nor the environment.
    pub async fn load_credentials(&mut self) -> Result<()> {
        self.mattermost.bot_token =
            load_credential("mattermost_bot_token", "MATTERMOST_BOT_TOKEN").await?;
        self.mattermost.command_token =
            load_credential("mattermost_command_token", "MATTERMOST_COMMAND_TOKEN").await?;
        self.netlify.client_secret =
            load_credential("netlify_client_secret", "NETLIFY_CLIENT_SECRET").await?;
        self.encryption_key =
            load_credential("netlify_encryption_key", "NETLIFY_ENCRYPTION_KEY").await?;
        self.webhook_secret = load_credential("netlify_webhook_secret", "NETLIFY_WEBHOOK_SECRET")
            .await
            .unwrap_or_default();
        Ok(())
    }

    /// URL users are redirected back to by Netlify after authorizing.
    #[must_use]
    pub fn oauth_redirect_url(&self) -> String {
        format!("{}/auth/redirect", self.public_url)
    }

    /// URL Netlify posts build notifications to.
    #[must_use]
    pub fn webhook_url(&self) -> String {
        format!("{}/webhook", self.public_url)
    }

    /// Callback URL for an interactive message action.
    #[must_use]
    pub fn action_url(&self, action: &str) -> String {
        format!("{}/command/{action}", self.public_url)
    }

    /// Slash command prefix including the leading slash, e.g. `/netlify`.
    #[must_use]
    pub fn base_command(&self) -> String {
        format!("/{}", self.mattermost.command_trigger)
    }

    fn validate(&mut self) -> Result<()> {
        self.public_url = normalize_url(&self.public_url);
        self.mattermost.server_url = normalize_url(&self.mattermost.server_url);
        self.netlify.api_url = normalize_url(&self.netlify.api_url);

        if self.public_url.is_empty() {
            return Err(AppError::Config("public_url must not be empty".into()));
        }

        if self.mattermost.server_url.is_empty() {
            return Err(AppError::Config(
                "mattermost.server_url must not be empty".into(),
            ));
        }

        if self.mattermost.command_trigger.trim().is_empty() {
            return Err(AppError::Config(
                "mattermost.command_trigger must not be empty".into(),
            ));
        }

        if self.netlify.client_id.trim().is_empty() {
            return Err(AppError::Config(
                "netlify.client_id must not be empty".into(),
            ));
        }

        if self.oauth_state_ttl_seconds == 0 {
            return Err(AppError::Config(
                "oauth_state_ttl_seconds must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}

fn normalize_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

/// Load a single credential from OS keychain with env-var fallback.
async fn load_credential(keyring_key: &str, env_key: &str) -> Result<String> {
    let key = keyring_key.to_owned();

    // keyring is synchronous I/O.
    let keychain_result = tokio::task::spawn_blocking(move || {
        keyring::Entry::new(KEYRING_SERVICE, &key).and_then(|entry| entry.get_password())
    })
    .await
    .map_err(|err| AppError::Config(format!("keychain task panicked: {err}")))?;

    match keychain_result {
        Ok(value) if !value.is_empty() => return Ok(value),
        Ok(_) => {
            warn!(key = keyring_key, "keychain entry is empty, trying env var");
        }
        Err(err) => {
            warn!(
                key = keyring_key,
                ?err,
                "keychain lookup failed, trying env var"
            );
        }
    }

    match env::var(env_key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::Config(format!(
            "credential {keyring_key} not found in keychain or {env_key} env var"
        ))),
    }
}
