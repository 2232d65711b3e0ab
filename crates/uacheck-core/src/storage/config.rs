//! Configuration storage operations

use crate::{
    models::{normalize_host, JiraSettings, OllamaSettings, Settings},
    storage::properties,
    Error, Result,
};
use std::collections::HashMap;
use std::path::PathBuf;

pub struct ConfigStorage {
    config_path: PathBuf,
}

impl ConfigStorage {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Load and validate settings. A missing file is `Error::ConfigMissing`.
    pub fn load(&self) -> Result<Settings> {
        if !self.config_path.exists() {
            return Err(Error::ConfigMissing(self.config_path.clone()));
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let settings = settings_from_properties(properties::parse(&content))?;
        settings.validate()?;
        Ok(settings)
    }
}

fn settings_from_properties(mut entries: HashMap<String, String>) -> Result<Settings> {
    let mut take = |key: &str| entries.remove(key).filter(|value| !value.is_empty());

    let host = take("jira.host")
        .ok_or_else(|| Error::Validation("jira.host is required".to_string()))?;
    let user = take("jira.user")
        .ok_or_else(|| Error::Validation("jira.user is required".to_string()))?;
    let password = take("jira.password");

    let defaults = OllamaSettings::default();
    let ollama = OllamaSettings {
        host: take("ollama.host")
            .map(|host| normalize_host(&host))
            .unwrap_or(defaults.host),
        model: take("ollama.model").unwrap_or(defaults.model),
    };

    Ok(Settings {
        jira: JiraSettings {
            host: normalize_host(&host),
            user,
            password,
        },
        ollama,
    })
}
