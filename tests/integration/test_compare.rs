//! Integration tests for `relgate compare`

use crate::helpers::{TestRepo, exit_code, run_relgate, stdout};
use anyhow::Result;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn write_wheel(path: &Path, entries: &[&str]) -> Result<()> {
  let file = File::create(path)?;
  let mut zip = zip::ZipWriter::new(file);
  let options = zip::write::FileOptions::default();
  for entry in entries {
    zip.start_file(*entry, options)?;
    zip.write_all(b"x")?;
  }
  zip.finish()?;
  Ok(())
}

fn write_sdist(path: &Path, top: &str, entries: &[&str]) -> Result<()> {
  let file = File::create(path)?;
  let mut tar = tar::Builder::new(GzEncoder::new(file, Compression::default()));
  for entry in entries {
    let mut header = tar::Header::new_gnu();
    header.set_size(1);
    header.set_mode(0o644);
    header.set_cksum();
    tar.append_data(&mut header, format!("{}/{}", top, entry), &b"x"[..])?;
  }
  tar.into_inner()?.finish()?;
  Ok(())
}

#[test]
fn test_compare_empty_pool_exits_0() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_relgate(&repo.path, &["compare"])?;
  assert_eq!(exit_code(&output), 0);
  assert!(stdout(&output).contains("No wheels"));
  Ok(())
}

#[test]
fn test_compare_matching_pair_reports_no_issues() -> Result<()> {
  let repo = TestRepo::new()?;
  let pool = repo.pool_dir();
  std::fs::create_dir_all(&pool)?;

  write_wheel(&pool.join("odict-1.9.0-py3-none-any.whl"), &["odict/__init__.py"])?;
  write_sdist(&pool.join("odict-1.9.0.tar.gz"), "odict-1.9.0", &[
    "odict/__init__.py",
    "pyproject.toml",
    "README.rst",
  ])?;

  let output = run_relgate(&repo.path, &["compare"])?;
  assert_eq!(exit_code(&output), 0);
  assert!(stdout(&output).contains("no issues found"));
  Ok(())
}

#[test]
fn test_compare_reports_file_missing_from_wheel() -> Result<()> {
  let repo = TestRepo::new()?;
  let pool = repo.pool_dir();
  std::fs::create_dir_all(&pool)?;

  write_wheel(&pool.join("node-1.0-py3-none-any.whl"), &["node/__init__.py"])?;
  write_sdist(&pool.join("node-1.0.tar.gz"), "node-1.0", &[
    "node/__init__.py",
    "node/behaviors.py",
  ])?;

  let output = run_relgate(&repo.path, &["compare"])?;
  // Informational command: differences never change the exit code
  assert_eq!(exit_code(&output), 0);
  let out = stdout(&output);
  assert!(out.contains("PACKAGE: node 1.0"));
  assert!(out.contains("FILES IN SDIST BUT NOT IN WHEEL"));
  assert!(out.contains("- node/behaviors.py"));
  Ok(())
}

#[test]
fn test_compare_reports_missing_sdist() -> Result<()> {
  let repo = TestRepo::new()?;
  let pool = repo.pool_dir();
  std::fs::create_dir_all(&pool)?;

  write_wheel(&pool.join("node-1.0-py3-none-any.whl"), &["node/__init__.py"])?;

  let output = run_relgate(&repo.path, &["compare"])?;
  assert_eq!(exit_code(&output), 0);
  let err = String::from_utf8_lossy(&output.stderr);
  assert!(err.contains("No sdist found"), "stderr: {}", err);
  Ok(())
}

#[test]
fn test_compare_json_output() -> Result<()> {
  let repo = TestRepo::new()?;
  let pool = repo.pool_dir();
  std::fs::create_dir_all(&pool)?;

  write_wheel(&pool.join("odict-1.9.0-py3-none-any.whl"), &["odict/__init__.py"])?;
  write_sdist(&pool.join("odict-1.9.0.tar.gz"), "odict-1.9.0", &["odict/__init__.py"])?;

  let output = run_relgate(&repo.path, &["compare", "--json"])?;
  assert_eq!(exit_code(&output), 0);

  let report: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let entries = report.as_array().expect("array report");
  assert_eq!(entries.len(), 1);
  assert_eq!(entries[0]["package"], "odict 1.9.0");
  assert_eq!(entries[0]["wheel_only"].as_array().unwrap().len(), 0);
  Ok(())
}
