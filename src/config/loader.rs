//! Locating and layering the configuration file
//!
//! Later layers win: built-in defaults, then the TOML file, then the
//! environment. Command line flags are applied by the caller on top.

use crate::{Result, config::Settings};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "SESSION_GATE_CONFIG";

/// Builds validated [`Settings`] from file and environment
#[derive(Debug, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn new() -> Self {
        Self
    }

    /// First existing file among `$SESSION_GATE_CONFIG` and
    /// `<config dir>/session-gate/config.toml`
    pub fn get_config_path() -> Option<PathBuf> {
        let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        if let Some(path) = &explicit
            && !path.is_file()
        {
            warn!(path = %path.display(), "{} does not name a file", CONFIG_PATH_ENV);
        }

        let user = dirs::config_dir().map(|dir| dir.join("session-gate").join("config.toml"));

        let found = explicit.into_iter().chain(user).find(|path| path.is_file());
        debug!(config = ?found, "Config file lookup");
        found
    }

    /// Layer `config_file` (if it exists) and the environment over the
    /// defaults, then validate the result
    pub fn load(&self, config_file: Option<&Path>) -> Result<Settings> {
        let from_file = match config_file {
            Some(path) if path.is_file() => {
                info!(path = %path.display(), "Reading configuration");
                Settings::from_file(path)?
            }
            Some(path) => {
                warn!(path = %path.display(), "Configuration file missing, using defaults");
                Settings::default()
            }
            None => Settings::default(),
        };

        let settings = from_file.merge_with_env()?;
        settings.validate()?;
        debug!(?settings, "Configuration ready");
        Ok(settings)
    }
}
