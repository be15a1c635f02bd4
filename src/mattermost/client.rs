//! Mattermost REST API v4 client acting as the bot user.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::MattermostConfig;
use crate::models::post::Post;
use crate::{AppError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ChannelResponse {
    id: String,
}

/// Bot-authenticated Mattermost client.
pub struct MattermostService {
    http: Client,
    api_url: String,
    bot_token: String,
    bot_user_id: String,
}

impl MattermostService {
    /// Build the client and resolve the bot's own user ID.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Mattermost` if the HTTP client cannot be built or
    /// the bot token is rejected.
    pub async fn connect(config: &MattermostConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AppError::Mattermost(format!("failed to build http client: {err}")))?;

        let mut service = Self {
            http,
            api_url: format!("{}/api/v4", config.server_url.trim_end_matches('/')),
            bot_token: config.bot_token.clone(),
            bot_user_id: String::new(),
        };

        let me: UserResponse = service
            .send(service.request(reqwest::Method::GET, "/users/me"), "resolve bot user")
            .await?
            .json()
            .await
            .map_err(|err| AppError::Mattermost(format!("invalid user response: {err}")))?;
        service.bot_user_id = me.id;

        info!(bot_user_id = %service.bot_user_id, "mattermost bot resolved");
        Ok(service)
    }

    /// Create a post visible to the whole channel.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Mattermost` if the API call fails.
    pub async fn create_post(&self, post: &Post) -> Result<()> {
        debug!(channel_id = %post.channel_id, "creating post");
        self.send(
            self.request(reqwest::Method::POST, "/posts").json(post),
            "create post",
        )
        .await?;
        Ok(())
    }

    /// Create a post visible only to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Mattermost` if the API call fails.
    pub async fn send_ephemeral(&self, user_id: &str, post: &Post) -> Result<()> {
        debug!(user_id, channel_id = %post.channel_id, "sending ephemeral post");
        self.send(
            self.request(reqwest::Method::POST, "/posts/ephemeral")
                .json(&json!({ "user_id": user_id, "post": post })),
            "send ephemeral post",
        )
        .await?;
        Ok(())
    }

    /// Post `message` in the direct channel between the bot and `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Mattermost` if the channel cannot be opened or the
    /// post fails.
    pub async fn send_direct_message(&self, user_id: &str, message: &str) -> Result<()> {
        let channel: ChannelResponse = self
            .send(
                self.request(reqwest::Method::POST, "/channels/direct")
                    .json(&[user_id, self.bot_user_id.as_str()]),
                "open direct channel",
            )
            .await?
            .json()
            .await
            .map_err(|err| AppError::Mattermost(format!("invalid channel response: {err}")))?;

        self.create_post(&Post::plain(channel.id, message)).await
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.api_url))
            .bearer_auth(&self.bot_token)
    }

    async fn send(&self, request: RequestBuilder, operation: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|err| AppError::Mattermost(format!("failed to {operation}: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Mattermost(format!(
                "failed to {operation}: HTTP {status}: {body}"
            )));
        }
        Ok(response)
    }
}
