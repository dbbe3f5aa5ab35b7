//! Artifact metadata records
//!
//! Name, version, and kind are parsed from the build backend's filename
//! convention exactly once, when the record is created from fresh build
//! output. Everything downstream (promotion, registry, pin generation,
//! artifact selection) carries the record instead of re-splitting filenames.

use crate::core::error::{GateError, GateResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;

/// The two distribution kinds a build must produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistKind {
  /// Binary-installable form (.whl)
  Wheel,
  /// Archived source form (.tar.gz)
  Sdist,
}

impl DistKind {
  /// File suffix for this kind
  pub fn suffix(&self) -> &'static str {
    match self {
      DistKind::Wheel => ".whl",
      DistKind::Sdist => ".tar.gz",
    }
  }

  /// Kind of a distribution file, by suffix
  pub fn of_file(file_name: &str) -> Option<DistKind> {
    if file_name.ends_with(DistKind::Wheel.suffix()) {
      Some(DistKind::Wheel)
    } else if file_name.ends_with(DistKind::Sdist.suffix()) {
      Some(DistKind::Sdist)
    } else {
      None
    }
  }
}

impl fmt::Display for DistKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DistKind::Wheel => write!(f, "wheel"),
      DistKind::Sdist => write!(f, "sdist"),
    }
  }
}

/// Metadata record for one built distribution artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
  /// Normalized package name (underscores folded to hyphens)
  pub package: String,
  /// Exact version string as built (e.g. `1.0.0.dev0`)
  pub version: String,
  pub kind: DistKind,
  /// File name inside the pool (and in the local build output)
  pub file_name: String,
  /// Content digest recorded at promotion time
  pub sha256: String,
}

impl Artifact {
  /// Create a record from a file in the local build output, attaching
  /// identity and digest at creation time
  pub fn from_build_output(path: &Path) -> GateResult<Self> {
    let file_name = path
      .file_name()
      .and_then(|n| n.to_str())
      .ok_or_else(|| GateError::message(format!("Unreadable artifact file name: {}", path.display())))?
      .to_string();

    let (package, version, kind) = parse_file_name(&file_name)?;
    let sha256 = digest_file(path)?;

    Ok(Self {
      package,
      version,
      kind,
      file_name,
      sha256,
    })
  }

  /// One `name==version` pin line for this artifact
  pub fn pin_line(&self) -> String {
    format!("{}=={}", self.package, self.version)
  }
}

/// Canonical comparison form for package names: lowercase, with dots and
/// underscores folded to hyphens (the form installers compare against)
pub fn normalize_name(name: &str) -> String {
  name.to_lowercase().replace(['_', '.'], "-")
}

/// Parse `{name}-{version}[-{tags}]{suffix}` per the distribution filename
/// convention: name and version are the first two `-`-delimited tokens, with
/// underscores in the name normalized to hyphens
pub fn parse_file_name(file_name: &str) -> GateResult<(String, String, DistKind)> {
  let kind = DistKind::of_file(file_name)
    .ok_or_else(|| GateError::message(format!("Not a wheel or sdist: {}", file_name)))?;

  // Suffix match established by of_file
  let stem = &file_name[..file_name.len() - kind.suffix().len()];

  let mut tokens = stem.split('-');
  let name = tokens
    .next()
    .filter(|t| !t.is_empty())
    .ok_or_else(|| GateError::message(format!("No package name in artifact file name: {}", file_name)))?;
  let version = tokens
    .next()
    .filter(|t| !t.is_empty())
    .ok_or_else(|| GateError::message(format!("No version in artifact file name: {}", file_name)))?;

  Ok((normalize_name(name), version.to_string(), kind))
}

/// Hex-encoded SHA-256 of a file's contents
pub fn digest_file(path: &Path) -> GateResult<String> {
  let bytes = std::fs::read(path)?;
  let mut hasher = Sha256::new();
  hasher.update(&bytes);
  Ok(format!("{:x}", hasher.finalize()))
}
