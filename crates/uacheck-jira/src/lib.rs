//! uacheck JIRA Integration
//!
//! Read-only client for loading the issue fields the analysis prompt needs.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::JiraAuth;
pub use client::JiraClient;
pub use error::{Error, Result};
pub use types::*;
