//! Shared artifact pool and pin file
//!
//! The pool is a repository-root-level directory holding built artifacts
//! from every package validated in the current run, plus a JSON registry of
//! their metadata records. The pin file is rewritten in full from the
//! registry's wheels after every promotion, so installation never silently
//! resolves a published version when a just-built one exists.
//!
//! Write contract: registry and pin-file writes are neither atomic nor
//! locked. Concurrent build phases for different packages race on the
//! rewrite and must be serialized by the external driver (one package
//! validated at a time). Per-package cleanup never touches the pool; only
//! [`ArtifactPool::reset`] clears it.

pub mod artifact;

use crate::core::config::LayoutConfig;
use crate::core::error::{GateError, GateResult, ResultExt, ValidationFailure};
use self::artifact::{Artifact, DistKind, normalize_name};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Registry manifest file inside the pool directory
pub const REGISTRY_FILE: &str = ".registry.json";

/// Persisted registry of pooled artifact records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
  /// RFC 3339 stamp of the last promotion
  #[serde(default)]
  pub updated_at: Option<String>,
  #[serde(default)]
  pub artifacts: Vec<Artifact>,
}

impl Registry {
  /// Wheel records, the population of the pin file
  pub fn wheels(&self) -> impl Iterator<Item = &Artifact> {
    self.artifacts.iter().filter(|a| a.kind == DistKind::Wheel)
  }
}

/// Handle on the shared pool for one repository
#[derive(Debug, Clone)]
pub struct ArtifactPool {
  dir: PathBuf,
  pins: PathBuf,
}

impl ArtifactPool {
  /// Resolve pool locations from the repository layout
  pub fn open(root: &Path, layout: &LayoutConfig) -> Self {
    Self {
      dir: root.join(&layout.pool),
      pins: root.join(&layout.pins),
    }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  pub fn pins_path(&self) -> &Path {
    &self.pins
  }

  fn registry_path(&self) -> PathBuf {
    self.dir.join(REGISTRY_FILE)
  }

  /// Load the registry, empty when the pool has never been written
  pub fn load_registry(&self) -> GateResult<Registry> {
    let path = self.registry_path();
    if !path.exists() {
      return Ok(Registry::default());
    }
    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).context(format!("Corrupt pool registry: {}", path.display()))
  }

  fn save_registry(&self, registry: &Registry) -> GateResult<()> {
    fs::write(self.registry_path(), serde_json::to_string_pretty(registry)?)?;
    Ok(())
  }

  /// Copy fresh build output into the pool (never move: the local output
  /// must survive for the check phase), replace the (package, kind) records,
  /// and rewrite the pin file in full
  pub fn promote(&self, artifacts: &[Artifact], from_dir: &Path) -> GateResult<()> {
    fs::create_dir_all(&self.dir).map_err(|e| {
      GateError::Validation(ValidationFailure::PromotionFailed {
        message: format!("cannot create pool {}: {}", self.dir.display(), e),
      })
    })?;

    for artifact in artifacts {
      let source = from_dir.join(&artifact.file_name);
      let target = self.dir.join(&artifact.file_name);
      fs::copy(&source, &target).map_err(|e| {
        GateError::Validation(ValidationFailure::PromotionFailed {
          message: format!("{} -> {}: {}", source.display(), target.display(), e),
        })
      })?;
    }

    let mut registry = self.load_registry()?;
    for artifact in artifacts {
      registry
        .artifacts
        .retain(|a| !(a.package == artifact.package && a.kind == artifact.kind));
      registry.artifacts.push(artifact.clone());
    }
    registry.updated_at = Some(chrono::Utc::now().to_rfc3339());

    self.save_registry(&registry)?;
    self.write_pins(&registry)?;
    Ok(())
  }

  /// Full rewrite of the pin file from the registry's wheels, one
  /// `name==version` line per package, sorted by name
  fn write_pins(&self, registry: &Registry) -> GateResult<()> {
    let mut pins: BTreeMap<&str, String> = BTreeMap::new();
    for wheel in registry.wheels() {
      pins.insert(wheel.package.as_str(), wheel.pin_line());
    }

    let mut content = String::new();
    content.push_str("# Exact versions of artifacts in the shared pool.\n");
    content.push_str(&format!(
      "# Rewritten in full by every build phase; generated {}.\n",
      chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    for line in pins.values() {
      content.push_str(line);
      content.push('\n');
    }

    fs::write(&self.pins, content)?;
    Ok(())
  }

  /// Look up the pooled artifact for a package and kind. Registry records
  /// are unique per (package, kind) because promotion replaces them.
  pub fn find(&self, package: &str, kind: DistKind) -> GateResult<Option<Artifact>> {
    let wanted = normalize_name(package);
    let registry = self.load_registry()?;
    Ok(
      registry
        .artifacts
        .into_iter()
        .find(|a| a.package == wanted && a.kind == kind),
    )
  }

  /// Absolute path of a pooled artifact
  pub fn artifact_path(&self, artifact: &Artifact) -> PathBuf {
    self.dir.join(&artifact.file_name)
  }

  /// Whether the pin file has been written
  pub fn has_pins(&self) -> bool {
    self.pins.is_file()
  }

  /// The explicit whole-run reset: removes the pool directory (artifacts
  /// and registry) and the pin file
  pub fn reset(&self) -> GateResult<()> {
    if self.dir.exists() {
      fs::remove_dir_all(&self.dir)?;
    }
    if self.pins.exists() {
      fs::remove_file(&self.pins)?;
    }
    Ok(())
  }
}
