//! OAuth2 authorization-code flow against Netlify.

use oauth2::basic::BasicClient;
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl,
    TokenResponse, TokenUrl,
};

use crate::config::GlobalConfig;
use crate::{AppError, Result};

/// Netlify OAuth application client.
#[derive(Clone)]
pub struct NetlifyOAuth {
    client: BasicClient,
}

impl NetlifyOAuth {
    /// Build the OAuth client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if any configured URL is invalid.
    pub fn new(config: &GlobalConfig) -> Result<Self> {
        let auth_url = AuthUrl::new(config.netlify.auth_url.clone())
            .map_err(|err| AppError::Config(format!("invalid netlify.auth_url: {err}")))?;
        let token_url = TokenUrl::new(config.netlify.token_url.clone())
            .map_err(|err| AppError::Config(format!("invalid netlify.token_url: {err}")))?;
        let redirect_url = RedirectUrl::new(config.oauth_redirect_url())
            .map_err(|err| AppError::Config(format!("invalid public_url: {err}")))?;

        let client = BasicClient::new(
            ClientId::new(config.netlify.client_id.clone()),
            Some(ClientSecret::new(config.netlify.client_secret.clone())),
            auth_url,
            Some(token_url),
        )
        .set_auth_type(AuthType::RequestBody)
        .set_redirect_uri(redirect_url);

        Ok(Self { client })
    }

    /// Netlify authorize URL carrying `state`.
    #[must_use]
    pub fn authorize_url(&self, state: &str) -> String {
        let state = state.to_owned();
        let (url, _) = self
            .client
            .authorize_url(move || CsrfToken::new(state))
            .url();
        url.to_string()
    }

    /// Exchange an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// Returns `AppError::OAuth` if the token endpoint rejects the code or
    /// cannot be reached.
    pub async fn exchange_code(&self, code: &str) -> Result<String> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_owned()))
            .request_async(async_http_client)
            .await
            .map_err(|err| AppError::OAuth(format!("token exchange failed: {err}")))?;
        Ok(token.access_token().secret().clone())
    }
}
