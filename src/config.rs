//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/bintree/bintree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `BINTREE_*` prefix
//!
//! Command-line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{BuildOptions, RenderStyle, TrailingPolicy, TruncationPolicy};

/// Errors while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("environment override: {0}")]
    Environment(String),

    #[error("serialize settings: {0}")]
    Serialize(String),
}

/// Unified configuration for bintree.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Handling of sources that end mid-tree (default: strict)
    pub truncation: TruncationPolicy,
    /// Handling of symbols after a complete tree (default: reject)
    pub trailing: TrailingPolicy,
    /// Structure view used by `show` (default: ascii)
    pub style: RenderStyle,
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit from base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub truncation: Option<TruncationPolicy>,
    pub trailing: Option<TrailingPolicy>,
    pub style: Option<RenderStyle>,
}

/// Get the XDG config directory for bintree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bintree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("bintree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn parse_override<T: FromStr<Err = String>>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, SettingsError> {
    match config.get_string(key) {
        Ok(val) => val.parse().map(Some).map_err(SettingsError::Environment),
        Err(_) => Ok(None),
    }
}

impl Settings {
    /// Decoder options derived from these settings.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            truncation: self.truncation,
            trailing: self.trailing,
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            truncation: overlay.truncation.unwrap_or(self.truncation),
            trailing: overlay.trailing.unwrap_or(self.trailing),
            style: overlay.style.unwrap_or(self.style),
        }
    }

    /// Load settings with layered precedence, using the XDG global config.
    pub fn load(local: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_from(global_config_path().as_deref(), local)
    }

    /// Load settings from explicit global and local config files.
    ///
    /// A missing global file is skipped; an explicitly requested local file
    /// must exist.
    #[instrument(level = "debug")]
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        if let Some(local_path) = local {
            debug!("loading config: {}", local_path.display());
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply BINTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("BINTREE"))
            .build()
            .map_err(|e| SettingsError::Environment(e.to_string()))?;

        if let Some(val) = parse_override(&config, "truncation")? {
            settings.truncation = val;
        }
        if let Some(val) = parse_override(&config, "trailing")? {
            settings.trailing = val;
        }
        if let Some(val) = parse_override(&config, "style")? {
            settings.style = val;
        }

        Ok(settings)
    }

    /// Effective settings as TOML, for `bintree config`.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))
    }
}
