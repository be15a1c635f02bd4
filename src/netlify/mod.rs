//! Netlify integration: REST client, OAuth and webhook signatures.

pub mod client;
pub mod oauth;
pub mod signature;

pub use client::{NetlifyClient, NetlifySession};
