//! Mattermost message attachment wire types.
//!
//! These mirror the Slack-compatible attachment format Mattermost renders in
//! posts, slash command responses and interactive message updates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Button or dropdown attached to a message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostAction {
    /// `button` or `select`.
    #[serde(rename = "type")]
    pub action_type: String,
    /// Label shown on the element.
    pub name: String,
    /// Greyed out when set.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    /// Dropdown entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PostActionOption>,
    /// Where Mattermost posts the interaction.
    pub integration: PostActionIntegration,
}

/// A single dropdown entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostActionOption {
    /// Label.
    pub text: String,
    /// Value sent back as `selected_option`.
    pub value: String,
}

/// Callback target of an interactive element.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostActionIntegration {
    /// Callback URL.
    pub url: String,
    /// Context echoed back in the callback body.
    #[serde(default)]
    pub context: Map<String, Value>,
}

/// Slack-compatible message attachment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Attachment {
    /// Plain-text summary for clients that cannot render attachments.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fallback: String,
    /// Left border colour.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
    /// Text above the attachment.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pretext: String,
    /// Bold title.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// Link behind the title.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title_link: String,
    /// Markdown body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Small print below the body.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub footer: String,
    /// Interactive elements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<PostAction>,
}

/// `props` object of a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostProps {
    /// Attachments rendered under the message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl PostProps {
    /// Props carrying the given attachments.
    #[must_use]
    pub fn with_attachments(attachments: Vec<Attachment>) -> Self {
        Self { attachments }
    }
}

/// A post as sent to `POST /api/v4/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Post {
    /// Existing post to replace, empty for a new post.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Target channel.
    pub channel_id: String,
    /// Markdown message.
    #[serde(default)]
    pub message: String,
    /// Attachments and other props.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<PostProps>,
}

impl Post {
    /// Plain markdown post.
    #[must_use]
    pub fn plain(channel_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            channel_id: channel_id.into(),
            message: message.into(),
            props: None,
        }
    }

    /// Ephemeral replacement for `post_id` carrying only `message`.
    #[must_use]
    pub fn replacement(
        post_id: impl Into<String>,
        channel_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: post_id.into(),
            ..Self::plain(channel_id, message)
        }
    }

    /// Post made only of attachments.
    #[must_use]
    pub fn with_attachments(channel_id: impl Into<String>, attachments: Vec<Attachment>) -> Self {
        Self {
            id: String::new(),
            channel_id: channel_id.into(),
            message: String::new(),
            props: Some(PostProps::with_attachments(attachments)),
        }
    }
}
