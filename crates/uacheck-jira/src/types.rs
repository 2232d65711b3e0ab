//! JIRA API types

use serde::{Deserialize, Serialize};
use uacheck_core::models::{IssueComment, IssueSnapshot};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssue {
    #[serde(default)]
    pub key: String,
    pub fields: JiraFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraFields {
    pub summary: String,
    pub description: Option<String>,
    /// Only the count is used.
    #[serde(default)]
    pub attachment: Vec<serde_json::Value>,
    pub issuetype: JiraIssueType,
    pub status: JiraStatus,
    #[serde(default)]
    pub comment: JiraCommentPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraIssueType {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraStatus {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JiraCommentPage {
    #[serde(default)]
    pub comments: Vec<JiraComment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraComment {
    pub created: String,
    pub author: JiraUser,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    pub display_name: String,
}

impl From<JiraIssue> for IssueSnapshot {
    fn from(issue: JiraIssue) -> Self {
        let fields = issue.fields;
        IssueSnapshot {
            title: fields.summary,
            description: fields.description,
            attachment_count: fields.attachment.len(),
            issue_type: fields.issuetype.name,
            status: fields.status.name,
            comments: fields
                .comment
                .comments
                .into_iter()
                .map(|comment| IssueComment {
                    created: comment.created,
                    author: comment.author.display_name,
                    body: comment.body,
                })
                .collect(),
        }
    }
}
