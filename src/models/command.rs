//! Slash command request and response bodies.

use serde::{Deserialize, Serialize};

use super::post::{Attachment, PostProps};

/// Form body Mattermost posts when a user runs a custom slash command.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SlashCommandRequest {
    /// Channel the command was run in.
    pub channel_id: String,
    /// Channel name.
    pub channel_name: String,
    /// Trigger word including the leading slash, e.g. `/netlify`.
    pub command: String,
    /// Everything typed after the trigger word.
    pub text: String,
    /// Verification token configured on the slash command.
    pub token: String,
    /// Invoking user.
    pub user_id: String,
    /// Invoking user's username.
    pub user_name: String,
    /// Team the channel belongs to.
    pub team_id: String,
    /// Team URL slug.
    pub team_domain: String,
    /// Delayed response URL.
    pub response_url: String,
    /// Trigger ID for opening dialogs.
    pub trigger_id: String,
}

/// Slash command split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Base command, e.g. `/netlify`.
    pub base: String,
    /// First word after the base command, empty when absent.
    pub action: String,
    /// Remaining words.
    pub parameters: Vec<String>,
}

impl ParsedCommand {
    /// Split `command` and `text` on whitespace.
    #[must_use]
    pub fn parse(command: &str, text: &str) -> Self {
        let mut words = command.split_whitespace().chain(text.split_whitespace());
        let base = words.next().unwrap_or_default().to_owned();
        let action = words.next().unwrap_or_default().to_owned();
        let parameters = words.map(str::to_owned).collect();
        Self {
            base,
            action,
            parameters,
        }
    }
}

/// Visibility of a slash command response.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Shown only to the invoking user.
    #[default]
    Ephemeral,
    /// Posted to the channel.
    InChannel,
}

/// JSON body returned to Mattermost for a slash command.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CommandResponse {
    /// Visibility.
    pub response_type: ResponseType,
    /// Markdown text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<PostProps>,
}

impl CommandResponse {
    /// Response that shows nothing to the user.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ephemeral markdown reply.
    #[must_use]
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: text.into(),
            props: None,
        }
    }

    /// Ephemeral reply carrying attachments.
    #[must_use]
    pub fn ephemeral_attachments(text: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            response_type: ResponseType::Ephemeral,
            text: text.into(),
            props: Some(PostProps::with_attachments(attachments)),
        }
    }
}
