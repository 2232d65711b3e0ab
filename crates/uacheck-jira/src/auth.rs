//! JIRA authentication

use crate::{Error, Result};
use uacheck_core::models::JiraSettings;

pub const KEYRING_SERVICE: &str = "uacheck";

pub struct JiraAuth {
    username: String,
    password: String,
}

impl JiraAuth {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Credentials from settings, reading the password from the OS keyring
    /// (service `uacheck`, account = Jira user) when the file omits it.
    pub fn from_settings(settings: &JiraSettings) -> Result<Self> {
        if settings.user.trim().is_empty() {
            return Err(Error::Auth("Jira user is not configured".to_string()));
        }

        let password = match &settings.password {
            Some(password) => password.clone(),
            None => {
                tracing::debug!("No jira.password configured, reading keyring");
                keyring::Entry::new(KEYRING_SERVICE, &settings.user)?.get_password()?
            }
        };

        Ok(Self::new(settings.user.clone(), password))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn to_basic_auth(&self) -> String {
        use base64::Engine;
        let credentials = format!("{}:{}", self.username, self.password);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }
}
