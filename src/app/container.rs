use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::TomlSettingsAdapter;
use crate::app::{PlanInteractor, SettingsInteractor};
use crate::config_initialization::initialize_settings;
use crate::error::SplitKitResult;
use crate::ports::SettingsPort;

/// Wires adapters into interactors
pub struct AppContainer {
    settings_port: Arc<dyn SettingsPort>,
}

impl AppContainer {
    /// Container backed by `config_path`, or the default settings location
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let adapter = match config_path {
            Some(path) => TomlSettingsAdapter::new(path),
            None => TomlSettingsAdapter::with_default_path(),
        };
        Self::with_port(Arc::new(adapter))
    }

    pub fn with_port(settings_port: Arc<dyn SettingsPort>) -> Self {
        Self { settings_port }
    }

    pub fn settings_interactor(&self) -> SettingsInteractor {
        SettingsInteractor::new(Arc::clone(&self.settings_port))
    }

    /// Planner over the resolved settings hierarchy
    pub fn plan_interactor(&self) -> SplitKitResult<PlanInteractor> {
        let settings = initialize_settings(self.settings_port.as_ref())?;
        Ok(PlanInteractor::new(settings))
    }
}
