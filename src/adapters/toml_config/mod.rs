// TOML config adapter - Settings persistence using TOML files

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::settings::AppSettings;
use crate::error::{SplitKitError, SplitKitResult};
use crate::ports::SettingsPort;

/// Environment variable naming an explicit settings file
pub const CONFIG_PATH_ENV: &str = "SPLITKIT_CONFIG";

/// TOML settings adapter
pub struct TomlSettingsAdapter {
    path: PathBuf,
}

impl TomlSettingsAdapter {
    /// Adapter bound to an explicit file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Adapter bound to the default location for this platform
    pub fn with_default_path() -> Self {
        Self::new(Self::default_config_path())
    }

    /// `$SPLITKIT_CONFIG`, then `%APPDATA%/SplitKit`, then `$HOME/.splitkit`, then the working directory
    pub fn default_config_path() -> PathBuf {
        if let Some(explicit) = std::env::var_os(CONFIG_PATH_ENV) {
            return PathBuf::from(explicit);
        }
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("SplitKit").join("config.toml");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".splitkit").join("config.toml");
        }
        PathBuf::from("splitkit_config.toml")
    }

    fn parse(&self, content: &str) -> SplitKitResult<AppSettings> {
        toml::from_str(content).map_err(|source| SplitKitError::ConfigParse {
            path: self.path.display().to_string(),
            source,
        })
    }
}

impl SettingsPort for TomlSettingsAdapter {
    fn load(&self) -> SplitKitResult<AppSettings> {
        if !self.path.exists() {
            debug!("No settings file at {}, using defaults", self.path.display());
            return Ok(AppSettings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        let settings = self.parse(&content)?;
        debug!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }

    fn save(&self, settings: &AppSettings) -> SplitKitResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(settings)?;
        fs::write(&self.path, content)?;
        info!("Saved settings to {}", self.path.display());
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
