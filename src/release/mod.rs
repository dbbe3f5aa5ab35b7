//! Release sequencing
//!
//! Packages release in configured group order (dependency order), each one
//! only when its changelog carries unreleased entries. This module owns the
//! ordering and the per-package pending status; the release command drives
//! the external release tool.

pub mod changes;

use crate::core::context::RepoContext;
use self::changes::scan_changes;
use serde::Serialize;

/// Pending-release status for one package
#[derive(Debug, Clone, Serialize)]
pub struct PendingRelease {
  pub package: String,
  pub version: Option<String>,
  pub ready: bool,
  pub reason: String,
}

/// Scan one package's changelog
pub fn package_status(ctx: &RepoContext, name: &str) -> PendingRelease {
  let dir = ctx.sources_dir().join(name);
  if !dir.is_dir() {
    return PendingRelease {
      package: name.to_string(),
      version: None,
      ready: false,
      reason: "Package directory not found".to_string(),
    };
  }

  let changes_file = dir.join("CHANGES.rst");
  if !changes_file.is_file() {
    return PendingRelease {
      package: name.to_string(),
      version: None,
      ready: false,
      reason: "No CHANGES.rst file".to_string(),
    };
  }

  let status = match std::fs::read_to_string(&changes_file) {
    Ok(content) => scan_changes(&content),
    Err(e) => {
      return PendingRelease {
        package: name.to_string(),
        version: None,
        ready: false,
        reason: format!("Unreadable CHANGES.rst: {}", e),
      };
    }
  };

  PendingRelease {
    package: name.to_string(),
    version: status.version().map(String::from),
    ready: status.ready(),
    reason: status.reason().to_string(),
  }
}

/// Full release order: configured groups, or every directory under
/// sources/ in sorted order when no groups exist. The bool reports whether
/// the order came from configuration.
pub fn release_order(ctx: &RepoContext) -> (Vec<String>, bool) {
  let configured = ctx.config().ordered_packages();
  if !configured.is_empty() {
    return (configured, true);
  }

  let mut packages = Vec::new();
  if let Ok(entries) = std::fs::read_dir(ctx.sources_dir()) {
    for entry in entries.flatten() {
      let name = entry.file_name();
      if entry.path().is_dir()
        && let Some(name) = name.to_str()
      {
        packages.push(name.to_string());
      }
    }
  }
  packages.sort();
  (packages, false)
}
