//! Domain model module declarations.

pub mod action;
pub mod command;
pub mod netlify;
pub mod post;
pub mod webhook;
