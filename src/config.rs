//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/dispatch-demo/dispatch-demo.toml`
//! 3. Local config: `<project_dir>/.dispatch-demo.toml`
//! 4. Environment variables: `DISPATCH_DEMO_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Unified configuration for dispatch-demo.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Print a header before each demo step
    pub explain: bool,
    /// Verify every demo line against its expected text
    pub check: bool,
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub explain: Option<bool>,
    pub check: Option<bool>,
}

/// Get the XDG config directory for dispatch-demo.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dispatch-demo").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("dispatch-demo.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".dispatch-demo.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            explain: overlay.explain.unwrap_or(self.explain),
            check: overlay.check.unwrap_or(self.check),
        }
    }

    /// Load settings with layered precedence: defaults, then the global file,
    /// then the project's local file, then `DISPATCH_DEMO_*` variables.
    ///
    /// # Arguments
    /// * `global_path` - Global config file; the CLI passes `--config-file` or
    ///   [`global_config_path`]
    /// * `project_dir` - Optional project directory for local config
    ///
    /// Missing files are skipped; unreadable or malformed ones are errors.
    pub fn load_layers(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(project) = project_dir {
            let local_path = local_config_path(project);
            if local_path.exists() {
                debug!("loading local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply DISPATCH_DEMO_* environment variables as explicit overrides.
    ///
    /// Settings are flat, so `DISPATCH_DEMO_CHECK` maps straight to `check`.
    /// A variable that is set but not a boolean is an error, as in a file.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("DISPATCH_DEMO"))
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_bool(&config, "explain")? {
            settings.explain = val;
        }
        if let Some(val) = env_bool(&config, "check")? {
            settings.check = val;
        }

        Ok(settings)
    }

    /// Apply command line flags; `None` leaves the loaded value alone.
    pub fn with_overrides(mut self, explain: Option<bool>, check: Option<bool>) -> Self {
        if let Some(val) = explain {
            self.explain = val;
        }
        if let Some(val) = check {
            self.check = val;
        }
        self
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# dispatch-demo configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/dispatch-demo/dispatch-demo.toml
#   Local:  <project_dir>/.dispatch-demo.toml
#   Env:    DISPATCH_DEMO_* environment variables

# Print a header before each demo step
# explain = false

# Compare every demo line with its expected text
# check = false
"#
        .to_string()
    }
}

fn env_bool(config: &Config, key: &str) -> Result<Option<bool>, ApplicationError> {
    match config.get_bool(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("DISPATCH_DEMO_{}: {}", key.to_uppercase(), e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_files_when_loading_then_uses_defaults() {
        let settings = Settings::load_layers(None, None).expect("load defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings {
            explain: true,
            check: false,
        };
        let merged = base.merge_with(&RawSettings {
            explain: None,
            check: Some(true),
        });
        assert!(merged.explain);
        assert!(merged.check);
    }

    #[test]
    fn given_cli_overrides_when_applied_then_only_set_flags_change() {
        let loaded = Settings {
            explain: true,
            check: true,
        };
        let settings = loaded.with_overrides(None, Some(false));
        assert!(settings.explain);
        assert!(!settings.check);
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.explain.is_none());
        assert!(raw.check.is_none());
    }
}
