// Application settings - explicit state loaded and saved at defined points

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::model::{PatternTemplate, DEFAULT_NAMING_PATTERN};

/// Formats the splitter can read and write
pub const SUPPORTED_FORMATS: [&str; 6] = ["mp3", "wav", "aac", "ogg", "m4a", "flac"];

pub const DEFAULT_OUTPUT_FORMAT: &str = "mp3";

pub const DEFAULT_RECENT_FILES: usize = 10;

/// Main window placement remembered between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            x: None,
            y: None,
        }
    }
}

/// Persistent user settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub output_format: String,
    pub output_directory: Option<String>,
    pub naming_pattern: String,
    pub overlap_seconds: f64,
    pub remember_last_settings: bool,
    pub theme: String,
    pub language: String,
    pub last_directory: Option<String>,
    pub window: WindowGeometry,
    pub recent_files: Vec<String>,
    pub last_configuration: BTreeMap<String, String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            output_format: DEFAULT_OUTPUT_FORMAT.to_string(),
            output_directory: None,
            naming_pattern: DEFAULT_NAMING_PATTERN.to_string(),
            overlap_seconds: 0.0,
            remember_last_settings: true,
            theme: "dark".to_string(),
            language: "en".to_string(),
            last_directory: None,
            window: WindowGeometry::default(),
            recent_files: Vec::new(),
            last_configuration: BTreeMap::new(),
        }
    }
}

impl AppSettings {
    /// Store a new naming pattern after checking it compiles and expands
    pub fn set_naming_pattern(&mut self, pattern: &str) -> Result<(), DomainError> {
        PatternTemplate::parse(pattern)?.validate()?;
        self.naming_pattern = pattern.to_string();
        Ok(())
    }

    /// Store a new default output format
    pub fn set_output_format(&mut self, format: &str) -> Result<(), DomainError> {
        self.output_format = normalize_format(format)?;
        Ok(())
    }

    /// Move `path` to the front of the recent list, dropping duplicates and anything past `max_count`
    pub fn add_recent_file(&mut self, path: &str, max_count: usize) {
        self.recent_files.retain(|existing| existing != path);
        self.recent_files.insert(0, path.to_string());
        self.recent_files.truncate(max_count);
    }

    pub fn clear_recent_files(&mut self) {
        self.recent_files.clear();
    }

    /// Replace the remembered settings with those of the last job; a no-op when remembering is switched off
    pub fn remember_configuration<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        if !self.remember_last_settings {
            return;
        }
        self.last_configuration.clear();
        for (key, value) in entries {
            self.last_configuration.insert(key.into(), value.into());
        }
    }

    /// Last job settings, empty when remembering is switched off
    pub fn last_configuration(&self) -> BTreeMap<String, String> {
        if self.remember_last_settings {
            self.last_configuration.clone()
        } else {
            BTreeMap::new()
        }
    }
}

/// Lower-case `format` and check it is one the splitter supports
pub fn normalize_format(format: &str) -> Result<String, DomainError> {
    let normalized = format.trim().trim_start_matches('.').to_ascii_lowercase();
    if SUPPORTED_FORMATS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(DomainError::BadArgs(format!(
            "Unsupported audio format '{}'. Supported: {}",
            format,
            SUPPORTED_FORMATS.join(", ")
        )))
    }
}
