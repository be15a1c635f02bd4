//! Persistence layer modules.
//!
//! Everything lives in one flat key-value table; the repositories give the
//! keys their meaning.

pub mod db;
pub mod kv;
pub mod retention;
pub mod schema;
pub mod state_repo;
pub mod subscription_repo;
pub mod token_repo;
