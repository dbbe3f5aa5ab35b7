//! Unified repository context shared across commands
//!
//! Built once in main and passed by reference, so every command sees the
//! same configuration and layout resolution.

use crate::core::config::GateConfig;
use crate::core::error::{GateError, GateResult, SetupError};
use crate::pool::ArtifactPool;
use std::path::{Path, PathBuf};

/// Repository-wide context: root directory plus parsed configuration
#[derive(Debug, Clone)]
pub struct RepoContext {
  root: PathBuf,
  config: GateConfig,
}

impl RepoContext {
  /// Build a context for the repository rooted at `root`
  pub fn load(root: &Path) -> GateResult<Self> {
    let config = GateConfig::load(root)?;
    Ok(Self {
      root: root.to_path_buf(),
      config,
    })
  }

  /// Repository root directory
  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Parsed configuration (defaults when relgate.toml is absent)
  pub fn config(&self) -> &GateConfig {
    &self.config
  }

  /// Directory containing package checkouts
  pub fn sources_dir(&self) -> PathBuf {
    self.root.join(&self.config.layout.sources)
  }

  /// Resolve a package by name, verifying its checkout exists
  pub fn package(&self, name: &str) -> GateResult<PackageRef> {
    let dir = self.sources_dir().join(name);
    if !dir.is_dir() {
      return Err(GateError::Setup(SetupError::PackageNotFound {
        name: name.to_string(),
        path: dir,
      }));
    }

    Ok(PackageRef {
      name: name.to_string(),
      dir,
    })
  }

  /// Open the shared artifact pool for this repository
  pub fn pool(&self) -> ArtifactPool {
    ArtifactPool::open(&self.root, &self.config.layout)
  }
}

/// A resolved package checkout
#[derive(Debug, Clone)]
pub struct PackageRef {
  pub name: String,
  pub dir: PathBuf,
}

impl PackageRef {
  /// Local build-output directory (cleared by the build phase, removed by clean)
  pub fn dist_dir(&self) -> PathBuf {
    self.dir.join("dist")
  }

  /// Path to the package's pyproject.toml
  pub fn manifest_path(&self) -> PathBuf {
    self.dir.join("pyproject.toml")
  }

  /// Verify the package has a pyproject.toml; phases that build or inspect
  /// artifacts require one
  pub fn require_manifest(&self) -> GateResult<()> {
    let path = self.manifest_path();
    if !path.is_file() {
      return Err(GateError::Setup(SetupError::ManifestMissing {
        name: self.name.clone(),
        path,
      }));
    }
    Ok(())
  }
}
