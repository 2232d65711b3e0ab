//! JIRA REST client

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use uacheck_core::models::{IssueKey, IssueSnapshot, JiraSettings};

use crate::{auth::JiraAuth, types::JiraIssue, Error, Result};

/// Jira client. The basic-auth header lives in this client's default
/// headers only, so no other HTTP client in the process ever carries it.
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
}

impl JiraClient {
    pub fn new(base_url: impl Into<String>, auth: &JiraAuth) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&auth.to_basic_auth())
            .map_err(|e| Error::Auth(format!("Invalid credentials: {}", e)))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &JiraSettings) -> Result<Self> {
        let auth = JiraAuth::from_settings(settings)?;
        Self::new(settings.host.clone(), &auth)
    }

    /// Load an issue and project it into a snapshot.
    ///
    /// Anything but a 200, or a transport failure, is `Error::Unavailable`.
    pub async fn fetch_issue(&self, key: &IssueKey) -> Result<IssueSnapshot> {
        let url = format!("{}/rest/api/2/issue/{}", self.base_url, key);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| unavailable(key, e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(unavailable(key, format!("unexpected status {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| unavailable(key, e.to_string()))?;

        let issue: JiraIssue = serde_json::from_str(&body)?;
        tracing::debug!(
            "Loaded {} with {} comment(s)",
            key,
            issue.fields.comment.comments.len()
        );

        Ok(issue.into())
    }
}

fn unavailable(key: &IssueKey, reason: String) -> Error {
    tracing::warn!("Jira request for {} failed: {}", key, reason);
    Error::Unavailable {
        key: key.to_string(),
        reason,
    }
}
