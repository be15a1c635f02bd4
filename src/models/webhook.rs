//! Inbound Netlify build notifications.

use serde::Deserialize;

/// Build events the bridge subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployEventKind {
    /// A build has started.
    Building,
    /// A deploy went live.
    Created,
    /// A build failed.
    Failed,
}

impl DeployEventKind {
    /// Every event a subscription registers a hook for.
    pub const ALL: [Self; 3] = [Self::Building, Self::Created, Self::Failed];

    /// Event name as used by Netlify hooks and the `X-Netlify-Event` header.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Building => "deploy_building",
            Self::Created => "deploy_created",
            Self::Failed => "deploy_failed",
        }
    }

    /// Parse an `X-Netlify-Event` header value.
    #[must_use]
    pub fn from_header(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value.trim())
    }
}

/// Deploy payload Netlify posts to `url` hooks.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct DeployEvent {
    /// Site name.
    #[serde(default)]
    pub name: Option<String>,
    /// Site identifier.
    #[serde(default)]
    pub site_id: Option<String>,
    /// Build identifier.
    #[serde(default)]
    pub build_id: Option<String>,
    /// Site admin URL on `app.netlify.com`.
    #[serde(default)]
    pub admin_url: Option<String>,
    /// Deploy state.
    #[serde(default)]
    pub state: Option<String>,
    /// Last message from a failed build.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Branch that was built.
    #[serde(default)]
    pub branch: Option<String>,
    /// HTTPS URL of the deploy.
    #[serde(default)]
    pub deploy_ssl_url: Option<String>,
}

impl DeployEvent {
    /// Build log URL on the Netlify dashboard.
    #[must_use]
    pub fn build_log_url(&self) -> String {
        format!(
            "{}/deploys/{}",
            self.admin_url.as_deref().unwrap_or_default(),
            self.build_id.as_deref().unwrap_or_default()
        )
    }
}
