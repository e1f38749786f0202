// Adapters - External system implementations

pub mod toml_config;

// Re-export adapters
pub use toml_config::TomlSettingsAdapter;
