//! Interactive message callback bodies.

use serde::{Deserialize, Serialize};

use super::post::PostProps;

/// Context echoed back by Mattermost when a button or dropdown is used.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ActionContext {
    /// Button action, e.g. `disconnect` or `cancel`.
    pub action: String,
    /// Secret proving the message was built by this service.
    #[serde(rename = "actionSecret")]
    pub action_secret: String,
    /// Dropdown selection.
    pub selected_option: String,
}

impl ActionContext {
    /// Whitespace separated fields of the dropdown selection.
    #[must_use]
    pub fn selected_fields(&self) -> Vec<&str> {
        self.selected_option.split_whitespace().collect()
    }
}

/// JSON body Mattermost posts to an integration URL.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ActionRequest {
    /// Acting user.
    pub user_id: String,
    /// Acting user's username.
    pub user_name: String,
    /// Channel of the post.
    pub channel_id: String,
    /// Channel name.
    pub channel_name: String,
    /// Team of the channel.
    pub team_id: String,
    /// Post carrying the element.
    pub post_id: String,
    /// Trigger ID for opening dialogs.
    pub trigger_id: String,
    /// Echoed integration context.
    pub context: ActionContext,
}

/// Replacement content for the post the element belongs to.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostUpdate {
    /// New markdown message.
    pub message: String,
    /// New props; an empty value removes the attachments.
    pub props: PostProps,
}

/// JSON body returned to Mattermost for an interactive callback.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActionResponse {
    /// Replace the original post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<PostUpdate>,
    /// Ephemeral note for the acting user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_text: Option<String>,
}

impl ActionResponse {
    /// Ephemeral note, post untouched.
    #[must_use]
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            update: None,
            ephemeral_text: Some(text.into()),
        }
    }

    /// Replace the post with `message` and no attachments.
    #[must_use]
    pub fn update_message(message: impl Into<String>) -> Self {
        Self::update(message, PostProps::default())
    }

    /// Replace the post with `message` and `props`.
    #[must_use]
    pub fn update(message: impl Into<String>, props: PostProps) -> Self {
        Self {
            update: Some(PostUpdate {
                message: message.into(),
                props,
            }),
            ephemeral_text: None,
        }
    }

    /// Attach an ephemeral note to this response.
    #[must_use]
    pub fn with_ephemeral(mut self, text: impl Into<String>) -> Self {
        self.ephemeral_text = Some(text.into());
        self
    }
}
