// Settings interactor - Reads and edits persistent settings through the settings port

use std::sync::Arc;

use tracing::info;

use crate::domain::settings::{AppSettings, DEFAULT_RECENT_FILES};
use crate::error::SplitKitResult;
use crate::ports::SettingsPort;

/// Interactor for settings commands
pub struct SettingsInteractor {
    settings_port: Arc<dyn SettingsPort>,
}

impl SettingsInteractor {
    pub fn new(settings_port: Arc<dyn SettingsPort>) -> Self {
        Self { settings_port }
    }

    pub fn load(&self) -> SplitKitResult<AppSettings> {
        self.settings_port.load()
    }

    pub fn location(&self) -> String {
        self.settings_port.location().display().to_string()
    }

    /// Validate and persist a new default naming pattern
    pub fn set_naming_pattern(&self, pattern: &str) -> SplitKitResult<AppSettings> {
        self.update(|settings| settings.set_naming_pattern(pattern).map_err(Into::into))
    }

    /// Persist a new default output format
    pub fn set_output_format(&self, format: &str) -> SplitKitResult<AppSettings> {
        self.update(|settings| settings.set_output_format(format).map_err(Into::into))
    }

    pub fn clear_recent_files(&self) -> SplitKitResult<AppSettings> {
        self.update(|settings| {
            settings.clear_recent_files();
            Ok(())
        })
    }

    /// Remember a planned job: its source joins the recent files and its options become the last configuration
    pub fn record_job(
        &self,
        source: &str,
        configuration: Vec<(String, String)>,
    ) -> SplitKitResult<AppSettings> {
        self.update(|settings| {
            settings.add_recent_file(source, DEFAULT_RECENT_FILES);
            settings.remember_configuration(configuration);
            if let Some(parent) = std::path::Path::new(source).parent() {
                if !parent.as_os_str().is_empty() {
                    settings.last_directory = Some(parent.display().to_string());
                }
            }
            Ok(())
        })
    }

    fn update<F>(&self, change: F) -> SplitKitResult<AppSettings>
    where
        F: FnOnce(&mut AppSettings) -> SplitKitResult<()>,
    {
        let mut settings = self.settings_port.load()?;
        change(&mut settings)?;
        self.settings_port.save(&settings)?;
        info!("Settings updated at {}", self.location());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::TomlSettingsAdapter;

    fn interactor(dir: &tempfile::TempDir) -> SettingsInteractor {
        let port = Arc::new(TomlSettingsAdapter::new(dir.path().join("config.toml")));
        SettingsInteractor::new(port)
    }

    #[test]
    fn test_set_pattern_persists() {
        let dir = tempfile::tempdir().unwrap();
        let settings = interactor(&dir);
        settings.set_naming_pattern("{original_name}-{number}").unwrap();
        assert_eq!(settings.load().unwrap().naming_pattern, "{original_name}-{number}");
    }

    #[test]
    fn test_invalid_pattern_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let settings = interactor(&dir);
        assert!(settings.set_naming_pattern("{nope}").is_err());
        assert!(!dir.path().join("config.toml").exists());
    }

    #[test]
    fn test_record_job() {
        let dir = tempfile::tempdir().unwrap();
        let settings = interactor(&dir);
        settings
            .record_job(
                "/music/a.mp3",
                vec![("method".to_string(), "equal_parts".to_string())],
            )
            .unwrap();

        let loaded = settings.load().unwrap();
        assert_eq!(loaded.recent_files, vec!["/music/a.mp3"]);
        assert_eq!(loaded.last_directory.as_deref(), Some("/music"));
        assert_eq!(
            loaded.last_configuration().get("method").map(String::as_str),
            Some("equal_parts")
        );

        settings.clear_recent_files().unwrap();
        assert!(settings.load().unwrap().recent_files.is_empty());
    }
}
