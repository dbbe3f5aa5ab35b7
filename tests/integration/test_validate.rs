//! Integration tests for `relgate validate` phase preconditions and exit
//! codes (phases needing a Python tool-chain are unit-tested against the
//! scripted runner)

use crate::helpers::{TestRepo, exit_code, run_relgate, stderr};
use anyhow::Result;

#[test]
fn test_build_without_sandbox_exits_2() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;

  let output = run_relgate(&repo.path, &["validate", "odict", "--build"])?;
  assert_eq!(exit_code(&output), 2);
  assert!(stderr(&output).contains("Sandbox"), "stderr: {}", stderr(&output));
  Ok(())
}

#[test]
fn test_check_without_build_exits_2() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;
  repo.fake_sandbox("odict")?;

  let output = run_relgate(&repo.path, &["validate", "odict", "--check"])?;
  assert_eq!(exit_code(&output), 2);
  assert!(stderr(&output).contains("Build output"), "stderr: {}", stderr(&output));
  Ok(())
}

#[test]
fn test_test_without_sandbox_exits_2() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;

  let output = run_relgate(&repo.path, &["validate", "odict", "--test"])?;
  assert_eq!(exit_code(&output), 2);
  Ok(())
}

#[test]
fn test_test_with_sandbox_but_empty_pool_exits_2() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;
  repo.fake_sandbox("odict")?;

  let output = run_relgate(&repo.path, &["validate", "odict", "--test"])?;
  assert_eq!(exit_code(&output), 2);
  assert!(stderr(&output).contains("shared pool"), "stderr: {}", stderr(&output));
  Ok(())
}

#[test]
fn test_clean_with_nothing_to_clean_exits_0() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;

  let output = run_relgate(&repo.path, &["validate", "odict", "--clean"])?;
  assert_eq!(exit_code(&output), 0);
  Ok(())
}

#[test]
fn test_clean_removes_sandbox_and_dist() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;
  repo.fake_sandbox("odict")?;
  std::fs::create_dir_all(repo.path.join("sources/odict/dist"))?;

  let output = run_relgate(&repo.path, &["validate", "odict", "--clean"])?;
  assert_eq!(exit_code(&output), 0);
  assert!(!repo.file_exists("sources/odict/venv"));
  assert!(!repo.file_exists("sources/odict/dist"));
  Ok(())
}

#[test]
fn test_unknown_package_exits_2() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_relgate(&repo.path, &["validate", "ghost", "--env"])?;
  assert_eq!(exit_code(&output), 2);
  assert!(stderr(&output).contains("not found"));
  Ok(())
}

#[test]
fn test_package_without_pyproject_exits_2() -> Result<()> {
  let repo = TestRepo::new()?;
  std::fs::create_dir_all(repo.path.join("sources/bare"))?;

  let output = run_relgate(&repo.path, &["validate", "bare", "--build"])?;
  assert_eq!(exit_code(&output), 2);
  assert!(stderr(&output).contains("pyproject.toml"));
  Ok(())
}

#[test]
fn test_phase_flag_is_required() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;

  let output = run_relgate(&repo.path, &["validate", "odict"])?;
  assert_eq!(exit_code(&output), 2);
  Ok(())
}

#[test]
fn test_phase_flags_are_mutually_exclusive() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;

  let output = run_relgate(&repo.path, &["validate", "odict", "--env", "--build"])?;
  assert_eq!(exit_code(&output), 2);
  Ok(())
}

#[test]
fn test_invalid_kind_is_rejected() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;

  let output = run_relgate(&repo.path, &["validate", "odict", "--test", "--kind", "egg"])?;
  assert_eq!(exit_code(&output), 2);
  Ok(())
}
