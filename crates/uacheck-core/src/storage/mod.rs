pub mod config;
pub mod properties;

pub use config::ConfigStorage;

use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "environment.properties";

pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("uacheck"))
}

/// Pick the configuration file to load.
///
/// An explicit path always wins. Otherwise `environment.properties` in the
/// working directory is preferred over the one in the user config dir. When
/// neither exists the working-directory path is returned so the caller can
/// report it as missing.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }

    match get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME)) {
        Some(user) if user.exists() => user,
        _ => local,
    }
}
