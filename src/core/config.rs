//! relgate configuration (relgate.toml) parsing and defaults
//!
//! The config file is optional: a repository with the conventional layout
//! (`sources/` checkouts, root-level `dist/` pool, `constraints.txt` pins)
//! needs no relgate.toml at all. Release groups are the one thing that only
//! exists in configuration.

use crate::core::error::{GateError, GateResult, SetupError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file, looked up at the repository root
pub const CONFIG_FILE: &str = "relgate.toml";

/// Top-level configuration for relgate
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GateConfig {
  #[serde(default)]
  pub layout: LayoutConfig,

  #[serde(default)]
  pub check: CheckConfig,

  /// Release groups in dependency order; packages inside a group release
  /// in listed order
  #[serde(default)]
  pub groups: Vec<ReleaseGroup>,
}

/// On-disk layout of the repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
  /// Directory containing package checkouts (relative to repo root)
  #[serde(default = "default_sources")]
  pub sources: PathBuf,

  /// Shared artifact pool directory (relative to repo root)
  #[serde(default = "default_pool")]
  pub pool: PathBuf,

  /// Pin file written by the build phase (relative to repo root)
  #[serde(default = "default_pins")]
  pub pins: PathBuf,
}

fn default_sources() -> PathBuf {
  PathBuf::from("sources")
}

fn default_pool() -> PathBuf {
  PathBuf::from("dist")
}

fn default_pins() -> PathBuf {
  PathBuf::from("constraints.txt")
}

impl Default for LayoutConfig {
  fn default() -> Self {
    Self {
      sources: default_sources(),
      pool: default_pool(),
      pins: default_pins(),
    }
  }
}

/// Quality gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
  /// Minimum acceptable quality score (0-10, inclusive lower bound)
  #[serde(default = "default_quality_threshold", rename = "quality-threshold")]
  pub quality_threshold: u32,
}

fn default_quality_threshold() -> u32 {
  8
}

impl Default for CheckConfig {
  fn default() -> Self {
    Self {
      quality_threshold: default_quality_threshold(),
    }
  }
}

/// A named group of packages released together, in dependency order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseGroup {
  pub name: String,
  pub packages: Vec<String>,
}

impl GateConfig {
  /// Load configuration from `<root>/relgate.toml`, falling back to
  /// defaults when the file does not exist
  pub fn load(root: &Path) -> GateResult<Self> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
      return Ok(Self::default());
    }

    let content = fs::read_to_string(&path)?;
    let config: GateConfig = toml_edit::de::from_str(&content).map_err(|e| {
      GateError::Setup(SetupError::Config {
        message: e.to_string(),
      })
    })?;

    config.validate()?;
    Ok(config)
  }

  /// Validate configuration invariants
  pub fn validate(&self) -> GateResult<()> {
    if self.check.quality_threshold > 10 {
      return Err(GateError::Setup(SetupError::Config {
        message: format!("quality-threshold must be 0-10, got {}", self.check.quality_threshold),
      }));
    }

    for group in &self.groups {
      if group.packages.is_empty() {
        return Err(GateError::Setup(SetupError::Config {
          message: format!("release group '{}' has no packages", group.name),
        }));
      }
    }

    Ok(())
  }

  /// All packages across all groups, in release order
  pub fn ordered_packages(&self) -> Vec<String> {
    self.groups.iter().flat_map(|g| g.packages.iter().cloned()).collect()
  }
}
