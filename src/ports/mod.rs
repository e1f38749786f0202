// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::domain::settings::AppSettings;
use crate::error::SplitKitResult;

/// Port for loading and saving persistent settings
pub trait SettingsPort: Send + Sync {
    /// Load settings, falling back to defaults when nothing is stored yet
    fn load(&self) -> SplitKitResult<AppSettings>;

    /// Persist settings, creating parent directories as needed
    fn save(&self, settings: &AppSettings) -> SplitKitResult<()>;

    /// Where the settings live
    fn location(&self) -> &Path;
}
