pub mod config;
pub mod issue;
pub mod verdict;

pub use config::{JiraSettings, OllamaSettings, Settings};
pub(crate) use config::normalize_host;
pub use issue::{IssueComment, IssueKey, IssueSnapshot};
pub use verdict::{Assessment, Verdict};
