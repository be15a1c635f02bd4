#![forbid(unsafe_code)]

//! Mattermost bridge to Netlify: connect accounts over OAuth, list sites,
//! deploy, roll back and receive build notifications from chat.

pub mod config;
pub mod crypto;
pub mod errors;
pub mod http;
pub mod mattermost;
pub mod models;
pub mod netlify;
pub mod persistence;
pub mod state;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
