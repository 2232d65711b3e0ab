pub mod error;
pub mod models;
pub mod prompt;
pub mod storage;

pub use error::{Error, Result};
pub use prompt::{build_prompt, Prompt, ResponseSchema};
