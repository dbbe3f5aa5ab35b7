//! Isolated execution environment for one package
//!
//! A sandbox is a disposable virtualenv rooted at a deterministic path under
//! the package checkout. At most one live sandbox exists per package: the
//! env phase unconditionally destroys and recreates it.

use crate::core::context::PackageRef;
use std::io;
use std::path::{Path, PathBuf};

/// Sandbox directory name inside the package checkout
pub const SANDBOX_DIR: &str = "venv";

/// A package-scoped sandbox
#[derive(Debug, Clone)]
pub struct Sandbox {
  root: PathBuf,
}

impl Sandbox {
  /// Deterministic sandbox location for a package
  pub fn for_package(pkg: &PackageRef) -> Self {
    Self {
      root: pkg.dir.join(SANDBOX_DIR),
    }
  }

  pub fn path(&self) -> &Path {
    &self.root
  }

  /// The sandbox interpreter
  pub fn python(&self) -> PathBuf {
    if cfg!(windows) {
      self.root.join("Scripts").join("python.exe")
    } else {
      self.root.join("bin").join("python")
    }
  }

  /// A sandbox is live when its interpreter exists
  pub fn exists(&self) -> bool {
    self.python().is_file()
  }

  /// Remove the sandbox directory if present
  pub fn destroy(&self) -> io::Result<()> {
    if self.root.exists() {
      std::fs::remove_dir_all(&self.root)?;
    }
    Ok(())
  }
}

/// Create the interpreter file so `exists()` reports a live sandbox
/// (test scaffolding shared by phase tests)
#[cfg(test)]
pub fn fake_create(sandbox: &Sandbox) {
  let python = sandbox.python();
  std::fs::create_dir_all(python.parent().unwrap()).unwrap();
  std::fs::write(python, "").unwrap();
}
