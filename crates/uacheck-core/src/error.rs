//! Core error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file not found: {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Invalid Jira issue code: '{0}'")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;
