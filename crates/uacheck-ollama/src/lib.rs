//! uacheck Ollama Integration
//!
//! Client for the two Ollama endpoints the analyzer needs: streaming model
//! pulls and schema-constrained generation.

pub mod client;
pub mod error;
pub mod progress;
pub mod provision;
pub mod types;

pub use client::{OllamaClient, PullStream};
pub use error::{Error, Result};
pub use progress::{ProgressTracker, ProgressUpdate};
pub use provision::{ensure_model, PullSummary};
pub use types::*;
