//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch multi-package repository
pub struct TestRepo {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  /// Create a new repository with an empty sources/ directory
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    std::fs::create_dir_all(path.join("sources"))?;
    Ok(Self { _root: root, path })
  }

  /// Add a package checkout with a minimal pyproject.toml
  pub fn add_package(&self, name: &str) -> Result<PathBuf> {
    let pkg_dir = self.path.join("sources").join(name);
    std::fs::create_dir_all(&pkg_dir)?;

    std::fs::write(
      pkg_dir.join("pyproject.toml"),
      format!(
        r#"[project]
name = "{}"
version = "1.0.0.dev0"

[project.optional-dependencies]
test = ["pytest"]
"#,
        name
      ),
    )?;

    Ok(pkg_dir)
  }

  /// Write a CHANGES.rst for a package
  pub fn write_changes(&self, name: &str, content: &str) -> Result<()> {
    let pkg_dir = self.path.join("sources").join(name);
    std::fs::write(pkg_dir.join("CHANGES.rst"), content)?;
    Ok(())
  }

  /// Create a fake sandbox (interpreter file only) so precondition checks
  /// see a live environment
  pub fn fake_sandbox(&self, name: &str) -> Result<()> {
    let python = if cfg!(windows) {
      self.path.join("sources").join(name).join("venv/Scripts/python.exe")
    } else {
      self.path.join("sources").join(name).join("venv/bin/python")
    };
    std::fs::create_dir_all(python.parent().unwrap())?;
    std::fs::write(python, "")?;
    Ok(())
  }

  /// Shared pool directory (default layout)
  pub fn pool_dir(&self) -> PathBuf {
    self.path.join("dist")
  }

  /// Pin file path (default layout)
  pub fn pins_path(&self) -> PathBuf {
    self.path.join("constraints.txt")
  }

  /// Check if a file exists relative to the repo root
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }
}

/// Run the relgate binary; non-zero exits are returned, not errors
pub fn run_relgate(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_relgate");
  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run relgate")
}

/// Exit code of a finished process, panicking on signals
pub fn exit_code(output: &Output) -> i32 {
  output.status.code().expect("relgate terminated by signal")
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}
