//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/formforge/formforge.toml`
//! 3. Environment variables: `FORMFORGE_*` prefix

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for formforge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding saved forms and the submission log (default: ~/.formforge)
    pub storage_dir: PathBuf,
    /// Origin used when deriving share links (default: https://formforge.app)
    pub origin: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            origin: "https://formforge.app".to_string(),
        }
    }
}

/// Get the default storage directory (~/.formforge).
fn default_storage_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".formforge"))
        .unwrap_or_else(|| PathBuf::from("~/.formforge"))
}

/// Get the XDG config directory for formforge.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "formforge").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("formforge.toml"))
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    ///
    /// Handles `~`, `$VAR`, and `${VAR}` syntax.
    fn expand_paths(&mut self) {
        let raw = self.storage_dir.to_string_lossy().to_string();
        let expanded = shellexpand::full(&raw)
            .map(|s| s.into_owned())
            .unwrap_or(raw);
        self.storage_dir = PathBuf::from(expanded);
    }

    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, ApplicationError> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default(
                "storage_dir",
                defaults.storage_dir.to_string_lossy().to_string(),
            )
            .map_err(config_err)?
            .set_default("origin", defaults.origin.clone())
            .map_err(config_err)?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        builder = builder.add_source(Environment::with_prefix("FORMFORGE").separator("__"));

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;

        settings.expand_paths();
        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# formforge configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/formforge/formforge.toml
#   Env:    FORMFORGE_* environment variables (explicit overrides)

# Directory holding saved forms and the submission log
# storage_dir = "~/.formforge"

# Origin used when deriving share links (formforge share <id>)
# origin = "https://formforge.app"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
