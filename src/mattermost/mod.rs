//! Mattermost bridge layer modules.

pub mod actions;
pub mod attachments;
pub mod client;
pub mod commands;
pub mod handlers;
pub mod messages;
