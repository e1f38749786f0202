//! Configuration initialization and hierarchy management

use tracing::{info, warn};

use crate::domain::settings::{normalize_format, AppSettings};
use crate::error::SplitKitResult;
use crate::ports::SettingsPort;

/// Environment variables that override the settings file
pub const ENV_NAMING_PATTERN: &str = "SPLITKIT_NAMING_PATTERN";
pub const ENV_OUTPUT_FORMAT: &str = "SPLITKIT_OUTPUT_FORMAT";
pub const ENV_OUTPUT_DIR: &str = "SPLITKIT_OUTPUT_DIR";

/// Resolve settings following precedence: Env > File > Defaults. CLI flags are applied per request on top.
pub fn initialize_settings(port: &dyn SettingsPort) -> SplitKitResult<AppSettings> {
    let mut settings = port.load()?;
    info!("Settings loaded from {}", port.location().display());

    let overrides = apply_environment_overrides(&mut settings, |key| std::env::var(key).ok())?;
    if overrides > 0 {
        info!("Applied {} environment variable overrides", overrides);
    }
    Ok(settings)
}

/// Apply overrides from `lookup`, returning how many were used; invalid values are errors, empty ones are ignored
pub fn apply_environment_overrides<F>(settings: &mut AppSettings, lookup: F) -> SplitKitResult<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = 0;

    if let Some(pattern) = non_empty(lookup(ENV_NAMING_PATTERN)) {
        info!("Found environment override: {} = {}", ENV_NAMING_PATTERN, pattern);
        settings.set_naming_pattern(&pattern)?;
        applied += 1;
    }

    if let Some(format) = non_empty(lookup(ENV_OUTPUT_FORMAT)) {
        info!("Found environment override: {} = {}", ENV_OUTPUT_FORMAT, format);
        settings.output_format = normalize_format(&format)?;
        applied += 1;
    }

    if let Some(dir) = non_empty(lookup(ENV_OUTPUT_DIR)) {
        info!("Found environment override: {} = {}", ENV_OUTPUT_DIR, dir);
        settings.output_directory = Some(dir);
        applied += 1;
    }

    Ok(applied)
}

fn non_empty(value: Option<String>) -> Option<String> {
    match value {
        Some(v) if v.trim().is_empty() => {
            warn!("Ignoring empty environment override");
            None
        }
        other => other,
    }
}
