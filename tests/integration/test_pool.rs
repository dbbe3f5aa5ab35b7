//! Integration tests for `relgate pool`

use crate::helpers::{TestRepo, exit_code, run_relgate, stdout};
use anyhow::Result;

/// Seed a pool the way a build phase would leave it
fn seed_pool(repo: &TestRepo) -> Result<()> {
  let pool = repo.pool_dir();
  std::fs::create_dir_all(&pool)?;
  std::fs::write(pool.join("odict-1.9.0.dev0-py3-none-any.whl"), "wheel-bytes")?;
  std::fs::write(
    pool.join(".registry.json"),
    r#"{
  "updated_at": "2026-08-07T10:00:00+00:00",
  "artifacts": [
    {
      "package": "odict",
      "version": "1.9.0.dev0",
      "kind": "wheel",
      "file_name": "odict-1.9.0.dev0-py3-none-any.whl",
      "sha256": "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef"
    }
  ]
}"#,
  )?;
  std::fs::write(repo.pins_path(), "odict==1.9.0.dev0\n")?;
  Ok(())
}

#[test]
fn test_pool_list_empty() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_relgate(&repo.path, &["pool", "list"])?;
  assert_eq!(exit_code(&output), 0);
  assert!(stdout(&output).contains("empty"));
  Ok(())
}

#[test]
fn test_pool_list_shows_artifacts() -> Result<()> {
  let repo = TestRepo::new()?;
  seed_pool(&repo)?;

  let output = run_relgate(&repo.path, &["pool", "list"])?;
  assert_eq!(exit_code(&output), 0);

  let out = stdout(&output);
  assert!(out.contains("odict 1.9.0.dev0 (wheel)"), "stdout: {}", out);
  assert!(out.contains("sha256:0123456789ab"));
  assert!(out.contains("constraints.txt"));
  Ok(())
}

#[test]
fn test_pool_list_json() -> Result<()> {
  let repo = TestRepo::new()?;
  seed_pool(&repo)?;

  let output = run_relgate(&repo.path, &["pool", "list", "--json"])?;
  assert_eq!(exit_code(&output), 0);

  let registry: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(registry["artifacts"][0]["package"], "odict");
  assert_eq!(registry["artifacts"][0]["kind"], "wheel");
  Ok(())
}

#[test]
fn test_pool_reset_removes_pool_and_pins() -> Result<()> {
  let repo = TestRepo::new()?;
  seed_pool(&repo)?;

  let output = run_relgate(&repo.path, &["pool", "reset"])?;
  assert_eq!(exit_code(&output), 0);
  assert!(!repo.pool_dir().exists());
  assert!(!repo.pins_path().exists());
  Ok(())
}

#[test]
fn test_pool_reset_is_idempotent() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_relgate(&repo.path, &["pool", "reset"])?;
  assert_eq!(exit_code(&output), 0);
  let output = run_relgate(&repo.path, &["pool", "reset"])?;
  assert_eq!(exit_code(&output), 0);
  Ok(())
}
