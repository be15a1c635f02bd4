//! Thin REST client for the Netlify API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::netlify::{
    Account, Build, BuildHook, Hook, Site, BOT_BUILD_HOOK_TITLE, BOT_BUILD_TRIGGER_TITLE,
};
use crate::{AppError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client bound to a Netlify API base URL.
///
/// Calls are made through a [`NetlifySession`] carrying the acting user's
/// access token.
#[derive(Clone)]
pub struct NetlifyClient {
    http: Client,
    api_url: String,
}

impl NetlifyClient {
    /// Create a client for the API rooted at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Netlify` if the HTTP client cannot be built.
    pub fn new(api_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AppError::Netlify(format!("failed to build http client: {err}")))?;
        Ok(Self::with_client(api_url, http))
    }

    /// Create a client reusing an existing HTTP connection pool.
    #[must_use]
    pub fn with_client(api_url: &str, http: Client) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Open a session authenticated with a user's access token.
    #[must_use]
    pub fn session<'a>(&'a self, access_token: &'a str) -> NetlifySession<'a> {
        NetlifySession {
            client: self,
            access_token,
        }
    }

    /// Post to a build hook URL, starting a build of `branch`.
    ///
    /// Build hooks are unauthenticated; the URL itself is the secret.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Netlify` if the request fails or Netlify answers
    /// with a non-2xx status.
    pub async fn trigger_build_hook(&self, hook_url: &str, branch: &str) -> Result<()> {
        debug!(branch, "triggering build hook");
        let request = self
            .http
            .post(hook_url)
            .query(&[
                ("trigger_branch", branch),
                ("trigger_title", BOT_BUILD_TRIGGER_TITLE),
            ])
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        send(request, "trigger build hook").await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }
}

/// Authenticated view of [`NetlifyClient`] for one user.
pub struct NetlifySession<'a> {
    client: &'a NetlifyClient,
    access_token: &'a str,
}

impl NetlifySession<'_> {
    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .http
            .get(self.client.url(path))
            .bearer_auth(self.access_token)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .http
            .post(self.client.url(path))
            .bearer_auth(self.access_token)
    }

    /// Sites the user can access.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Netlify` if the API call fails.
    pub async fn list_sites(&self) -> Result<Vec<Site>> {
        json(send(self.get("/sites"), "list sites").await?, "list sites").await
    }

    /// A single site.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Netlify` if the API call fails.
    pub async fn get_site(&self, site_id: &str) -> Result<Site> {
        let response = send(self.get(&format!("/sites/{site_id}")), "get site").await?;
        json(response, "get site").await
    }

    /// The user's primary account.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Netlify` if the API call fails and
    /// `AppError::NotFound` if the user has no account.
    pub async fn get_account(&self) -> Result<Account> {
        let accounts: Vec<Account> =
            json(send(self.get("/accounts"), "list accounts").await?, "list accounts").await?;
        accounts
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("no netlify account".into()))
    }

    /// Build hooks configured on a site.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Netlify` if the API call fails.
    pub async fn list_build_hooks(&self, site_id: &str) -> Result<Vec<BuildHook>> {
        let response = send(
            self.get(&format!("/sites/{site_id}/build_hooks")),
            "list build hooks",
        )
        .await?;
        json(response, "list build hooks").await
    }

    /// Create the bot's build hook for `branch`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Netlify` if the API call fails.
    pub async fn create_build_hook(&self, site_id: &str, branch: &str) -> Result<BuildHook> {
        let body = BuildHook {
            title: BOT_BUILD_HOOK_TITLE.into(),
            branch: branch.to_owned(),
            ..BuildHook::default()
        };
        let response = send(
            self.post(&format!("/sites/{site_id}/build_hooks")).json(&body),
            "create build hook",
        )
        .await?;
        json(response, "create build hook").await
    }

    /// Builds of a site, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Netlify` if the API call fails.
    pub async fn list_builds(&self, site_id: &str) -> Result<Vec<Build>> {
        let response = send(self.get(&format!("/sites/{site_id}/builds")), "list builds").await?;
        json(response, "list builds").await
    }

    /// Publish an earlier deploy again.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Netlify` if the API call fails.
    pub async fn restore_deploy(&self, site_id: &str, deploy_id: &str) -> Result<()> {
        send(
            self.post(&format!("/sites/{site_id}/deploys/{deploy_id}/restore")),
            "restore deploy",
        )
        .await?;
        Ok(())
    }

    /// Notification hooks configured on a site.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Netlify` if the API call fails.
    pub async fn list_hooks(&self, site_id: &str) -> Result<Vec<Hook>> {
        let response = send(
            self.get("/hooks").query(&[("site_id", site_id)]),
            "list hooks",
        )
        .await?;
        json(response, "list hooks").await
    }

    /// Register a notification hook.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Netlify` if the API call fails.
    pub async fn create_hook(&self, hook: &Hook) -> Result<Hook> {
        let response = send(
            self.post("/hooks")
                .query(&[("site_id", hook.site_id.as_str())])
                .json(hook),
            "create hook",
        )
        .await?;
        json(response, "create hook").await
    }
}

async fn send(request: RequestBuilder, operation: &str) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|err| AppError::Netlify(format!("failed to {operation}: {err}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Netlify(format!(
            "failed to {operation}: HTTP {status}: {body}"
        )));
    }
    Ok(response)
}

async fn json<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T> {
    response
        .json()
        .await
        .map_err(|err| AppError::Netlify(format!("invalid {operation} response: {err}")))
}
