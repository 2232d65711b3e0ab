//! Application settings

use crate::{Error, Result};

pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "mistral";

/// Resolved settings, immutable once the session starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub jira: JiraSettings,
    pub ollama: OllamaSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JiraSettings {
    pub host: String,
    pub user: String,
    /// Falls back to the OS keyring when absent.
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OllamaSettings {
    pub host: String,
    pub model: String,
}

impl Settings {
    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        self.jira.validate()?;
        self.ollama.validate()?;
        Ok(())
    }

    /// Apply command-line overrides on top of the file values.
    pub fn apply_overrides(&mut self, model: Option<&str>, ollama_host: Option<&str>) {
        if let Some(model) = model {
            self.ollama.model = model.trim().to_string();
        }
        if let Some(host) = ollama_host {
            self.ollama.host = normalize_host(host);
        }
    }
}

impl JiraSettings {
    /// Validate Jira settings
    pub fn validate(&self) -> Result<()> {
        validate_host("jira.host", &self.host)?;

        if self.user.trim().is_empty() {
            return Err(Error::Validation("jira.user cannot be empty".to_string()));
        }

        Ok(())
    }
}

impl OllamaSettings {
    /// Validate Ollama settings
    pub fn validate(&self) -> Result<()> {
        validate_host("ollama.host", &self.host)?;

        if self.model.trim().is_empty() {
            return Err(Error::Validation(
                "ollama.model cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_OLLAMA_HOST.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}

/// Strip surrounding whitespace and trailing slashes from a base URL.
pub(crate) fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('/').to_string()
}

fn validate_host(key: &str, host: &str) -> Result<()> {
    if host.trim().is_empty() {
        return Err(Error::Validation(format!("{} cannot be empty", key)));
    }

    if !host.starts_with("http://") && !host.starts_with("https://") {
        return Err(Error::Validation(format!(
            "{} must start with http:// or https:// (got '{}')",
            key, host
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jira() -> JiraSettings {
        JiraSettings {
            host: "https://jira.example.com".to_string(),
            user: "qa-bot".to_string(),
            password: Some("secret".to_string()),
        }
    }

    #[test]
    fn test_default_ollama_settings() {
        let settings = OllamaSettings::default();
        assert_eq!(settings.host, "http://localhost:11434");
        assert_eq!(settings.model, "mistral");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_jira_settings_validation() {
        let mut settings = jira();
        assert!(settings.validate().is_ok());

        settings.host = "".to_string();
        assert!(settings.validate().is_err());

        settings.host = "jira.example.com".to_string();
        assert!(settings.validate().is_err());

        settings.host = "http://jira.example.com".to_string();
        settings.user = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_password_is_optional() {
        let settings = Settings {
            jira: JiraSettings {
                password: None,
                ..jira()
            },
            ollama: OllamaSettings::default(),
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_apply_overrides() {
        let mut settings = Settings {
            jira: jira(),
            ollama: OllamaSettings::default(),
        };

        settings.apply_overrides(Some("llama3"), Some("http://gpu-box:11434/"));
        assert_eq!(settings.ollama.model, "llama3");
        assert_eq!(settings.ollama.host, "http://gpu-box:11434");
        assert_eq!(settings.jira, jira());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_absent_overrides_keep_file_values() {
        let mut settings = Settings {
            jira: jira(),
            ollama: OllamaSettings {
                host: "http://gpu-box:11434".to_string(),
                model: "llama3".to_string(),
            },
        };
        let before = settings.clone();

        settings.apply_overrides(None, None);
        assert_eq!(settings, before);
    }

    #[test]
    fn test_overrides_are_validated() {
        let mut settings = Settings {
            jira: jira(),
            ollama: OllamaSettings::default(),
        };

        settings.apply_overrides(None, Some("gpu-box:11434"));
        assert!(settings.validate().is_err());

        settings.apply_overrides(Some("  "), Some("http://gpu-box:11434"));
        assert!(matches!(settings.validate(), Err(Error::Validation(ref m)) if m.contains("ollama.model")));
    }

    #[test]
    fn test_ollama_model_required() {
        let settings = OllamaSettings {
            model: "".to_string(),
            ..OllamaSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
