//! Pipeline settings (database/legacy paths, partition constants).
//!
//! Resolution follows a priority chain, first hit wins:
//!
//! 1. `codex.toml` in the working root
//! 2. `~/.config/codex/settings.toml` (platform config dir)
//! 3. built-in defaults
//!
//! Command-line flags are applied on top by the binaries. Relative paths are
//! resolved against the working root.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::crossref::CrossRefOptions;
use crate::partition::{PartitionRules, TrailingShard};

/// Project-local settings file name.
pub const PROJECT_SETTINGS: &str = "codex.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub paths: PathSettings,
    pub partition: PartitionSettings,
    pub crossref: CrossRefSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathSettings {
    /// Database root holding `item/`, `merchant/`, ... and `recipe.yaml`.
    pub db: PathBuf,
    /// Directory holding the legacy `*.txt` exports.
    pub legacy: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            db: PathBuf::from("db"),
            legacy: PathBuf::from("soda"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartitionSettings {
    pub shard_span: u32,
    pub boundary_step: u32,
    /// Never write the last open shard, as the legacy converter did.
    pub legacy_trailing_shard: bool,
}

impl Default for PartitionSettings {
    fn default() -> Self {
        let rules = PartitionRules::default();
        Self {
            shard_span: rules.span,
            boundary_step: rules.step,
            legacy_trailing_shard: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrossRefSettings {
    pub check_recipe_refs: bool,
}

/// User-wide settings file: `<config dir>/codex/settings.toml`.
pub fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join("codex").join("settings.toml"))
}

impl Settings {
    /// Resolve settings for a run rooted at `root`.
    pub fn resolve(root: &Path) -> Result<Self, SettingsError> {
        let project = root.join(PROJECT_SETTINGS);
        let source = if project.is_file() {
            Some(project)
        } else {
            user_settings_path().filter(|p| p.is_file())
        };

        let mut settings = match source {
            Some(path) => {
                log::debug!("Loading settings from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        settings.paths.db = root.join(&settings.paths.db);
        settings.paths.legacy = root.join(&settings.paths.legacy);
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&contents, &path.display().to_string())
    }

    /// Parse and validate settings text. `origin` labels parse errors.
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(contents).map_err(|e| SettingsError::Parse {
            path: origin.to_string(),
            source: e,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let p = &self.partition;
        if p.boundary_step == 0 {
            return Err(SettingsError::Invalid(
                "partition.boundary_step must be positive".to_string(),
            ));
        }
        if p.shard_span < p.boundary_step {
            return Err(SettingsError::Invalid(format!(
                "partition.shard_span ({}) must be at least partition.boundary_step ({})",
                p.shard_span, p.boundary_step
            )));
        }
        Ok(())
    }

    pub fn partition_rules(&self) -> PartitionRules {
        PartitionRules {
            span: self.partition.shard_span,
            step: self.partition.boundary_step,
            trailing: if self.partition.legacy_trailing_shard {
                TrailingShard::Drop
            } else {
                TrailingShard::Flush
            },
        }
    }

    pub fn crossref_options(&self) -> CrossRefOptions {
        CrossRefOptions {
            check_recipes: self.crossref.check_recipe_refs,
        }
    }
}
