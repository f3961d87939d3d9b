// Settings service
// Loads the TOML configuration file the interface runs with

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::Settings;

/// Default location of the configuration file, platform-resolved.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "termcal").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load settings from a specific TOML file.
pub fn load(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let settings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(settings)
}

/// Load settings from the default location, falling back to defaults when
/// no config file exists or it cannot be parsed.
pub fn load_or_default() -> Settings {
    let Some(path) = config_path() else {
        return Settings::default();
    };
    if !path.exists() {
        return Settings::default();
    }
    match load(&path) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("falling back to default settings: {:#}", err);
            Settings::default()
        }
    }
}
