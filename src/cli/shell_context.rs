//! Shared runtime state for CLI interactions and command execution.

use std::path::{Path, PathBuf};

use dialoguer::theme::ColorfulTheme;
use tracing::info;

use crate::{
    cli::{
        commands,
        output::{self, OutputPreferences},
        registry::{CommandEntry, CommandRegistry},
    },
    config::{Config, ConfigManager},
    core::LedgerManager,
    storage::JsonStorage,
    utils::paths,
};

use super::core::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub manager: LedgerManager,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub data_dir: PathBuf,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_home(mode, &paths::app_home_dir())
    }

    /// Builds the shell around the stores under `home`, reporting any store that failed to load.
    pub fn with_home(mode: CliMode, home: &Path) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(home)?;
        let config = config_manager.load()?;
        apply_output_preferences(mode, &config);

        let data_dir = config.resolve_data_dir(home);
        let storage = JsonStorage::new(data_dir.clone())?;
        let (manager, warnings) =
            LedgerManager::open(Box::new(storage), config.conversion.clone());
        info!(dir = %data_dir.display(), "shell started");

        let context = ShellContext {
            mode,
            registry,
            manager,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            data_dir,
            running: true,
        };
        context.report_load(&warnings);
        Ok(context)
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn prompt(&self) -> String {
        format!("expenses ({})> ", self.manager.history().len())
    }

    pub(crate) fn report_load(&self, warnings: &[crate::errors::LedgerError]) {
        for warning in warnings {
            output::warning(warning);
        }
        if !warnings.is_empty() {
            output::info("Missing or unreadable stores start empty.");
        }
    }
}

pub(crate) fn apply_output_preferences(mode: CliMode, config: &Config) {
    output::set_preferences(OutputPreferences {
        color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
    });
}
