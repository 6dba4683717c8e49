//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsbst/rsbst.toml`
//! 3. Explicit config file passed on the command line
//! 4. Environment variables: `RSBST_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::cli::CliError;
use crate::display::DisplayStyle;
use crate::domain::Order;

/// Unified configuration for rsbst.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Traversal used by `walk` when no `--order` is given
    pub order: Order,
    /// Tree rendering style
    pub style: DisplayStyle,
    /// Text placed between values when printing a traversal
    pub separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            order: Order::default(),
            style: DisplayStyle::default(),
            separator: " => ".into(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    order: Option<Order>,
    style: Option<DisplayStyle>,
    separator: Option<String>,
}

/// Get the XDG config directory for rsbst.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rsbst").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rsbst.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, CliError> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| CliError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: config::ConfigError) -> CliError {
    CliError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            order: overlay.order.unwrap_or(self.order),
            style: overlay.style.unwrap_or(self.style),
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Config file given on the command line; must exist
    #[instrument(level = "debug")]
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply RSBST_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, CliError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("RSBST")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("order") {
            settings.order = val.parse().map_err(|e| CliError::Config {
                message: format!("RSBST_ORDER: {e}"),
            })?;
        }
        if let Ok(val) = config.get::<DisplayStyle>("style") {
            settings.style = val;
        }
        if let Ok(val) = config.get_string("separator") {
            settings.separator = val;
        }

        Ok(settings)
    }

    /// Serialize as TOML, the same shape the config files use.
    pub fn to_toml(&self) -> Result<String, CliError> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config {
            message: format!("serialize settings: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    /// Defaults overlaid with `path` only, ignoring global config and env.
    fn load_file(path: &Path) -> Result<Settings, CliError> {
        Ok(Settings::default().merge_with(&load_raw_settings(path)?))
    }

    #[rstest]
    fn given_defaults_when_created_then_in_order_and_sideways() {
        let settings = Settings::default();
        assert_eq!(settings.order, Order::In);
        assert_eq!(settings.style, DisplayStyle::Sideways);
        assert_eq!(settings.separator, " => ");
    }

    #[rstest]
    fn given_partial_file_when_loading_then_unspecified_keys_keep_defaults() {
        let file = write_config("order = \"post\"\n");
        let settings = load_file(file.path()).unwrap();
        assert_eq!(settings.order, Order::Post);
        assert_eq!(settings.style, DisplayStyle::Sideways);
        assert_eq!(settings.separator, " => ");
    }

    #[rstest]
    fn given_full_file_when_loading_then_all_keys_apply() {
        let file = write_config("order = \"level\"\nstyle = \"tree\"\nseparator = \", \"\n");
        let settings = load_file(file.path()).unwrap();
        assert_eq!(
            settings,
            Settings {
                order: Order::Level,
                style: DisplayStyle::Tree,
                separator: ", ".into(),
            }
        );
    }

    #[rstest]
    fn given_invalid_toml_when_loading_then_config_error() {
        let file = write_config("order = [\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[rstest]
    fn given_missing_file_when_loading_then_config_error_names_path() {
        let err = load_file(Path::new("/nonexistent/rsbst.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rsbst.toml"));
    }

    #[rstest]
    fn given_settings_when_serializing_then_toml_round_trips() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        assert!(text.contains("order = \"in\""));
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}
