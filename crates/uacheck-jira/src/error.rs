//! Error types for JIRA integration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("Error loading Jira issue: {key}\nIs the Jira instance running?\nAre you connected to the VPN (if applicable)?\n")]
    Unavailable { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
