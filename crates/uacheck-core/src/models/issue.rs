//! Issue key and the snapshot extracted from a Jira issue

use crate::{Error, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static ISSUE_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+-\d+$").expect("valid issue key pattern"));

/// A validated Jira issue key such as `ABC-123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey(String);

impl IssueKey {
    pub fn parse(input: &str) -> Result<Self> {
        if ISSUE_KEY_PATTERN.is_match(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(Error::InvalidKey(input.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for IssueKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only projection of the issue fields the prompt needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueSnapshot {
    pub title: String,
    pub description: Option<String>,
    pub attachment_count: usize,
    pub issue_type: String,
    pub status: String,
    /// Chronological, as returned by Jira.
    pub comments: Vec<IssueComment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueComment {
    pub created: String,
    pub author: String,
    pub body: String,
}

impl fmt::Display for IssueComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}: {}", self.created, self.author, self.body)
    }
}
