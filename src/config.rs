//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/forestry/forestry.toml`
//! 3. Local config: `<dir>/.forestry.toml`
//! 4. Environment variables: `FORESTRY_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// What happens to already parsed records when a text load fails part way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextLoadPolicy {
    /// Buffer all records and only append them if the whole file parses.
    #[default]
    AllOrNothing,
    /// Append records as they are parsed; a failure keeps the earlier ones.
    Partial,
}

impl FromStr for TextLoadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all-or-nothing" => Ok(Self::AllOrNothing),
            "partial" => Ok(Self::Partial),
            other => Err(format!(
                "unknown text_load policy '{}' (expected all-or-nothing or partial)",
                other
            )),
        }
    }
}

impl fmt::Display for TextLoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllOrNothing => f.write_str("all-or-nothing"),
            Self::Partial => f.write_str("partial"),
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub snapshot_dir: Option<PathBuf>,
    pub snapshot_extension: Option<String>,
    pub text_load: Option<TextLoadPolicy>,
}

/// Unified configuration for forestry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `<name>.<snapshot_extension>` files (default: ".")
    pub snapshot_dir: PathBuf,
    /// Snapshot file extension without the dot (default: "db")
    pub snapshot_extension: String,
    /// Failure semantics of delimited text loads
    pub text_load: TextLoadPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot_dir: PathBuf::from("."),
            snapshot_extension: "db".into(),
            text_load: TextLoadPolicy::default(),
        }
    }
}

/// Get the XDG config directory for forestry.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "forestry").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("forestry.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".forestry.toml")
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input as is.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
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
    /// Full path of the snapshot for a forest name.
    pub fn snapshot_path(&self, name: &str) -> PathBuf {
        self.snapshot_dir
            .join(format!("{}.{}", name, self.snapshot_extension))
    }

    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.snapshot_dir.to_string_lossy().as_ref());
        self.snapshot_dir = PathBuf::from(expanded);
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            snapshot_dir: overlay
                .snapshot_dir
                .clone()
                .unwrap_or_else(|| self.snapshot_dir.clone()),
            snapshot_extension: overlay
                .snapshot_extension
                .clone()
                .unwrap_or_else(|| self.snapshot_extension.clone()),
            text_load: overlay.text_load.unwrap_or(self.text_load),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory searched for `.forestry.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/forestry/forestry.toml`
    /// 3. Local config: `<local_dir>/.forestry.toml`
    /// 4. Environment variables: `FORESTRY_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current, None)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply FORESTRY_* environment variables as explicit overrides.
    ///
    /// `source` replaces the process environment (used by tests).
    pub fn apply_env_overrides(
        mut settings: Self,
        source: Option<config::Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FORESTRY")
                    .prefix_separator("_")
                    .separator("__")
                    .source(source),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("snapshot_dir") {
            settings.snapshot_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("snapshot_extension") {
            settings.snapshot_extension = val;
        }
        if let Ok(val) = config.get_string("text_load") {
            settings.text_load = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }

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
        r#"# forestry configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/forestry/forestry.toml
#   Local:  <dir>/.forestry.toml
#   Env:    FORESTRY_* environment variables

# Directory holding forest snapshots
# snapshot_dir = "."

# Snapshot file extension: <forest-name>.<snapshot_extension>
# snapshot_extension = "db"

# Text import failure semantics: "all-or-nothing" or "partial"
# text_load = "all-or-nothing"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
