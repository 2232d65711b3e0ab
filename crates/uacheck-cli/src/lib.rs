//! uacheck CLI Library
//!
//! The interactive session loop and terminal rendering, exposed as a
//! library for testing.

pub mod render;
pub mod session;

pub use render::{report_pull_failure, ProgressPrinter};
pub use session::{Session, SessionStats, EXIT_SENTINEL};
