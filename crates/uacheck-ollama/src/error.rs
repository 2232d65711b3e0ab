//! Error types for Ollama integration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Stream error: {0}")]
    Stream(#[from] tokio_util::codec::LinesCodecError),

    #[error("Ollama returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Pull failed: {0}")]
    Pull(String),
}

pub type Result<T> = std::result::Result<T, Error>;
