pub mod interactive;
pub mod settings;

pub use interactive::{run_interactive_config, show_config};
pub use settings::{Config, ConfigError, DataConfig, OllamaConfig, WeatherConfig};

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Platform config directory for this application
#[inline]
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("travel-planner"))
        .context("Could not determine user config directory")
}
