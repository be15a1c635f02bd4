//! Netlify REST resources used by the bridge.
//!
//! Netlify returns `null` for many string fields; those deserialize as empty
//! strings so the presentation layer only has one "missing" case to handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Title of the build hook the bot creates and reuses on every site.
pub const BOT_BUILD_HOOK_TITLE: &str = "Mattermost Netlify Bot";

/// Title attached to builds triggered through the bot's build hook.
pub const BOT_BUILD_TRIGGER_TITLE: &str = "Deploy triggered from Mattermost";

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Repository settings of a site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildSettings {
    /// Repository URL.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub repo_url: String,
    /// Production branch.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub repo_branch: String,
}

/// A Netlify site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Site {
    /// Site identifier.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    /// Site name (subdomain on `netlify.app`).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Primary URL.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    /// Custom domain, empty when none is configured.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub custom_domain: String,
    /// Team the site belongs to.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub account_name: String,
    /// Last modification time as reported by Netlify.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub updated_at: String,
    /// Repository settings; absent for manually deployed sites.
    #[serde(default)]
    pub build_settings: Option<BuildSettings>,
}

impl Site {
    /// Production branch, empty when the site has no repository.
    #[must_use]
    pub fn branch(&self) -> &str {
        self.build_settings
            .as_ref()
            .map_or("", |settings| settings.repo_branch.as_str())
    }

    /// Repository URL, empty when the site has no repository.
    #[must_use]
    pub fn repo_url(&self) -> &str {
        self.build_settings
            .as_ref()
            .map_or("", |settings| settings.repo_url.as_str())
    }
}

/// The authenticated user's Netlify account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Account identifier.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    /// Account name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Billing email.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub billing_email: String,
    /// Plan slug.
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub account_type: String,
    /// Human readable plan name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub type_name: String,
    /// Roles available on the account.
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub roles_allowed: Vec<String>,
    /// Creation time.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
    /// Last modification time.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub updated_at: String,
}

/// A URL that triggers a build when posted to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildHook {
    /// Hook identifier.
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Hook title.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Branch built by the hook.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub branch: String,
    /// Trigger URL.
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub url: String,
}

/// Destination of an outgoing notification hook.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HookData {
    /// Target URL for `url` hooks.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

/// An outgoing notification hook configured on a site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hook {
    /// Hook identifier.
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Site the hook belongs to.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub site_id: String,
    /// Hook kind, `url` for plain HTTP callbacks.
    #[serde(rename = "type", default, deserialize_with = "null_as_empty")]
    pub hook_type: String,
    /// Event the hook fires on.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event: String,
    /// Hook destination.
    #[serde(default)]
    pub data: HookData,
}

impl Hook {
    /// New `url` hook posting `event` notifications for `site_id` to `url`.
    #[must_use]
    pub fn url_hook(site_id: &str, event: &str, url: &str) -> Self {
        Self {
            id: String::new(),
            site_id: site_id.to_owned(),
            hook_type: "url".into(),
            event: event.to_owned(),
            data: HookData { url: url.to_owned() },
        }
    }
}

/// A site build.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Build {
    /// Build identifier.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    /// Deploy produced by this build.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deploy_id: String,
    /// Commit the build ran against.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sha: String,
    /// Whether the build has finished.
    #[serde(default)]
    pub done: bool,
    /// Error message of a failed build.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub error: String,
    /// Start time.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
}

impl Build {
    /// Finished without error, so its deploy can be restored.
    #[must_use]
    pub fn is_restorable(&self) -> bool {
        self.done && self.error.is_empty() && !self.deploy_id.is_empty()
    }
}

/// Render a Netlify timestamp in RFC 822 style, e.g. `02 Jan 06 15:04 UTC`.
///
/// Returns `None` when the value is missing or not RFC 3339.
#[must_use]
pub fn format_netlify_date(raw: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(raw.trim()).ok()?;
    Some(
        parsed
            .with_timezone(&Utc)
            .format("%d %b %y %H:%M UTC")
            .to_string(),
    )
}
