//! Wheel vs. sdist content comparison
//!
//! Read-only listing diff between the two archive forms of one package.
//! Some differences are expected and filtered: sdists carry metadata,
//! documentation, and test files that never belong in a wheel, and
//! src-layout packages prefix their module tree with `src/`.

use crate::core::error::{GateResult, ResultExt};
use crate::pool::artifact::parse_file_name;
use flate2::read::GzDecoder;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

/// Metadata files expected only in the sdist
const SDIST_METADATA: [&str; 4] = ["PKG-INFO", "setup.cfg", "setup.py", "pyproject.toml"];

/// Documentation prefixes expected only in the sdist
const DOC_PREFIXES: [&str; 4] = ["LICENSE", "README", "CHANGES", "HISTORY"];

/// Text suffixes that are not packaged into wheels
const TEXT_SUFFIXES: [&str; 6] = [".rst", ".md", ".txt", ".ini", ".cfg", ".toml"];

/// Comparison result for one package's wheel/sdist pair
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveDiff {
  pub package: String,
  pub wheel: String,
  /// None when no sdist counterpart was found in the pool
  pub sdist: Option<String>,
  pub wheel_count: usize,
  pub sdist_count: usize,
  /// Files in the wheel with no sdist counterpart
  pub wheel_only: Vec<String>,
  /// Installable files in the sdist that are missing from the wheel
  pub sdist_only: Vec<String>,
}

impl ArchiveDiff {
  /// True when the pair exists and contents match after filtering
  pub fn clean(&self) -> bool {
    self.sdist.is_some() && self.wheel_only.is_empty() && self.sdist_only.is_empty()
  }
}

/// Compare one pooled wheel against its sdist counterpart
pub fn compare_wheel(pool_dir: &Path, wheel_name: &str) -> GateResult<ArchiveDiff> {
  let (package, version, _) = parse_file_name(wheel_name)?;

  // The sdist shares the wheel's first two filename tokens
  let stem = wheel_name
    .split('-')
    .take(2)
    .collect::<Vec<_>>()
    .join("-");
  let sdist_name = format!("{}.tar.gz", stem);
  let sdist_path = pool_dir.join(&sdist_name);

  let wheel_files = wheel_entries(&pool_dir.join(wheel_name))?;

  if !sdist_path.is_file() {
    return Ok(ArchiveDiff {
      package: format!("{} {}", package, version),
      wheel: wheel_name.to_string(),
      sdist: None,
      wheel_count: wheel_files.len(),
      sdist_count: 0,
      wheel_only: Vec::new(),
      sdist_only: Vec::new(),
    });
  }

  let sdist_files = sdist_entries(&sdist_path)?;
  let sdist_normalized: BTreeSet<String> = sdist_files.iter().map(|f| normalize_sdist_path(f)).collect();
  let sdist_installable: BTreeSet<String> = sdist_normalized
    .iter()
    .filter(|f| is_installable(f))
    .cloned()
    .collect();

  let wheel_only: Vec<String> = wheel_files.difference(&sdist_normalized).cloned().collect();
  let sdist_only: Vec<String> = sdist_installable.difference(&wheel_files).cloned().collect();

  Ok(ArchiveDiff {
    package: format!("{} {}", package, version),
    wheel: wheel_name.to_string(),
    sdist: Some(sdist_name),
    wheel_count: wheel_files.len(),
    sdist_count: sdist_files.len(),
    wheel_only,
    sdist_only,
  })
}

/// File listing of a wheel (zip format), without wheel metadata
pub fn wheel_entries(path: &Path) -> GateResult<BTreeSet<String>> {
  let file = File::open(path)?;
  let archive = zip::ZipArchive::new(file).with_context(|| format!("Unreadable wheel: {}", path.display()))?;

  let mut files = BTreeSet::new();
  for name in archive.file_names() {
    if name.ends_with('/') || name.contains(".dist-info/") {
      continue;
    }
    files.insert(name.to_string());
  }
  Ok(files)
}

/// File listing of an sdist (tar.gz format), with the top-level
/// `name-version/` component removed and sdist-only metadata dropped
pub fn sdist_entries(path: &Path) -> GateResult<BTreeSet<String>> {
  let file = File::open(path)?;
  let mut archive = tar::Archive::new(GzDecoder::new(file));

  let mut files = BTreeSet::new();
  for entry in archive.entries()? {
    let entry = entry?;
    if !entry.header().entry_type().is_file() {
      continue;
    }

    let raw = entry.path()?.to_string_lossy().into_owned();
    let Some((_, inner)) = raw.split_once('/') else {
      continue;
    };

    if SDIST_METADATA.contains(&inner) {
      continue;
    }
    if DOC_PREFIXES.iter().any(|p| inner.starts_with(p)) {
      continue;
    }
    if inner == ".gitignore" || inner.ends_with("/.gitignore") {
      continue;
    }

    files.insert(inner.to_string());
  }
  Ok(files)
}

/// Fold the `src/` prefix of src-layout packages so paths line up with the
/// wheel's flat layout
fn normalize_sdist_path(path: &str) -> String {
  path.strip_prefix("src/").unwrap_or(path).to_string()
}

/// Whether an sdist file is expected to be installed into the wheel
fn is_installable(path: &str) -> bool {
  if path.starts_with("tests/") || path.contains("/tests/") {
    return false;
  }
  !TEXT_SUFFIXES.iter().any(|s| path.ends_with(s))
}
