//! Integration tests for `relgate release`

use crate::helpers::{TestRepo, exit_code, run_relgate, stdout};
use anyhow::Result;

const PENDING: &str = "\
1.1.0 (unreleased)
------------------

- Add new behavior hooks.
  [maintainer]
";

const SETTLED: &str = "\
1.1.0 (unreleased)
------------------

- Nothing changed yet.
";

#[test]
fn test_list_shows_pending_packages() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;
  repo.write_changes("odict", PENDING)?;
  repo.add_package("plumber")?;
  repo.write_changes("plumber", SETTLED)?;

  let output = run_relgate(&repo.path, &["release", "--list"])?;
  assert_eq!(exit_code(&output), 0);

  let out = stdout(&output);
  assert!(out.contains("Packages to release: 1"), "stdout: {}", out);
  assert!(out.contains("- odict (1.1.0)"));
  assert!(!out.contains("- plumber"));
  Ok(())
}

#[test]
fn test_dry_run_releases_nothing() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;
  repo.write_changes("odict", PENDING)?;

  // The release tool is not installed in the test environment; dry-run
  // must still succeed because it never invokes it
  let output = run_relgate(&repo.path, &["release", "--dry-run"])?;
  assert_eq!(exit_code(&output), 0);

  let out = stdout(&output);
  assert!(out.contains("DRY-RUN"));
  assert!(out.contains("Would run fullrelease"));
  Ok(())
}

#[test]
fn test_no_pending_changes_means_nothing_to_release() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;
  repo.write_changes("odict", SETTLED)?;

  let output = run_relgate(&repo.path, &["release"])?;
  assert_eq!(exit_code(&output), 0);
  assert!(stdout(&output).contains("No packages need release."));
  Ok(())
}

#[test]
fn test_package_without_changelog_is_skipped() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;

  let output = run_relgate(&repo.path, &["release", "--list"])?;
  assert_eq!(exit_code(&output), 0);
  assert!(stdout(&output).contains("Packages to release: 0"));
  Ok(())
}

#[test]
fn test_configured_groups_limit_and_order_the_scan() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;
  repo.write_changes("odict", PENDING)?;
  repo.add_package("unmanaged")?;
  repo.write_changes("unmanaged", PENDING)?;

  std::fs::write(
    repo.path.join("relgate.toml"),
    "[[groups]]\nname = \"Base\"\npackages = [\"odict\"]\n",
  )?;

  let output = run_relgate(&repo.path, &["release", "--list"])?;
  assert_eq!(exit_code(&output), 0);

  let out = stdout(&output);
  assert!(out.contains("- odict"));
  // Not in any group, so not part of the release order
  assert!(!out.contains("- unmanaged"));
  Ok(())
}

#[test]
fn test_package_filter_restricts_selection() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_package("odict")?;
  repo.write_changes("odict", PENDING)?;
  repo.add_package("node")?;
  repo.write_changes("node", PENDING)?;

  let output = run_relgate(&repo.path, &["release", "--list", "--package", "node"])?;
  assert_eq!(exit_code(&output), 0);

  let out = stdout(&output);
  assert!(out.contains("- node"));
  assert!(!out.contains("- odict"));
  Ok(())
}
