//! `relgate release` - release packages with unreleased changelog entries
//!
//! Scans the configured release order for packages whose CHANGES.rst has
//! pending entries and drives the external release tool for each, one
//! package at a time (releases are serialized by design; the shared pool
//! and pin file have no lock).

use crate::core::context::RepoContext;
use crate::core::error::{GateError, GateResult, ValidationFailure};
use crate::release::{PendingRelease, package_status, release_order};
use crate::tools::{CommandSpec, SystemRunner, ToolRunner, run_checked};
use crate::ui::output;
use crate::ui::progress::ScanProgress;
use std::path::Path;

/// Options for the release command
#[derive(Debug, Clone, Default)]
pub struct ReleaseOpts {
  pub dry_run: bool,
  pub list_only: bool,
  /// Restrict to these packages (user order preserved)
  pub packages: Vec<String>,
  pub skip: Vec<String>,
  /// Prepare and tag but do not upload
  pub no_upload: bool,
  pub verbose: bool,
}

/// Run the release command
pub fn run_release(ctx: &RepoContext, opts: &ReleaseOpts) -> GateResult<()> {
  let runner = SystemRunner::new(opts.verbose);
  run_release_with(ctx, opts, &runner)
}

pub(crate) fn run_release_with(ctx: &RepoContext, opts: &ReleaseOpts, runner: &dyn ToolRunner) -> GateResult<()> {
  let (order, from_config) = release_order(ctx);
  if !from_config {
    output::warn("No [[groups]] in relgate.toml; releasing sources/ in alphabetical order");
  }

  let selected: Vec<String> = if opts.packages.is_empty() {
    order
  } else {
    // Keep user-specified order but drop names outside the release order
    opts.packages.iter().filter(|p| order.contains(p)).cloned().collect()
  };
  let selected: Vec<String> = selected.into_iter().filter(|p| !opts.skip.contains(p)).collect();

  println!("Checking packages for unreleased changes...");
  println!();

  let mut progress = (!opts.verbose && selected.len() > 1).then(|| ScanProgress::new(selected.len(), "Scanning changelogs"));

  let mut to_release: Vec<PendingRelease> = Vec::new();
  let mut skipped: Vec<PendingRelease> = Vec::new();
  for name in &selected {
    let status = package_status(ctx, name);
    if let Some(progress) = progress.as_mut() {
      progress.inc();
    }
    if status.ready {
      if opts.verbose || opts.list_only {
        println!("  {} ({}): {}", status.package, status.version.as_deref().unwrap_or("?"), status.reason);
      }
      to_release.push(status);
    } else {
      output::info(&format!("  {}: SKIP - {}", status.package, status.reason), opts.verbose);
      skipped.push(status);
    }
  }

  println!();
  println!("Packages to release: {}", to_release.len());
  println!("Packages skipped: {}", skipped.len());

  if opts.list_only {
    if !to_release.is_empty() {
      println!();
      println!("Packages needing release:");
      for status in &to_release {
        println!("  - {} ({})", status.package, status.version.as_deref().unwrap_or("?"));
      }
    }
    return Ok(());
  }

  if to_release.is_empty() {
    println!();
    println!("No packages need release.");
    return Ok(());
  }

  println!();
  if opts.dry_run {
    output::banner("DRY-RUN MODE - No actual releases will be made");
  }
  println!();

  let mut released = Vec::new();
  let mut failed = Vec::new();

  for status in &to_release {
    println!(
      "Releasing {} ({})...",
      status.package,
      status.version.as_deref().unwrap_or("?")
    );

    let pkg_dir = ctx.sources_dir().join(&status.package);
    match release_package(&pkg_dir, opts, runner) {
      Ok(()) => {
        released.push(status.package.clone());
        println!("  OK");
      }
      Err(e) => {
        failed.push(status.package.clone());
        output::error(&format!("  FAILED: {}", e));
      }
    }
    println!();
  }

  println!("{}", "=".repeat(60));
  println!("RELEASE SUMMARY");
  println!("{}", "=".repeat(60));
  println!("Released: {}", released.len());
  println!("Failed: {}", failed.len());
  println!("Skipped: {}", skipped.len());

  if !failed.is_empty() {
    println!();
    println!("Failed packages:");
    for package in &failed {
      println!("  - {}", package);
    }
    return Err(GateError::Validation(ValidationFailure::ReleasesFailed { failed }));
  }

  Ok(())
}

/// Release one package with the external release tool
fn release_package(pkg_dir: &Path, opts: &ReleaseOpts, runner: &dyn ToolRunner) -> GateResult<()> {
  if opts.dry_run {
    println!("  [DRY-RUN] Would run fullrelease in {}", pkg_dir.display());
    return Ok(());
  }

  let with_install_hint = |e: GateError| {
    if let GateError::Message { message, .. } = &e
      && message.contains("Failed to execute")
    {
      return GateError::with_help(
        message.clone(),
        "Install the release tool: pip install zest.releaser[recommended]",
      );
    }
    e
  };

  if opts.no_upload {
    // Prepare, tag, and bump without uploading
    let prerelease = CommandSpec::new("prerelease").arg("--no-input").cwd(pkg_dir);
    run_checked(runner, &prerelease).map_err(with_install_hint)?;

    for tool in ["release", "postrelease"] {
      let spec = CommandSpec::new(tool).arg("--no-input").cwd(pkg_dir);
      match runner.run(&spec) {
        Ok(out) if !out.success() => {
          output::warn(&format!("{} exited with {:?}; inspect the package state", tool, out.code));
        }
        Ok(_) => {}
        Err(e) => output::warn(&format!("{} could not run: {}", tool, e)),
      }
    }
    return Ok(());
  }

  let fullrelease = CommandSpec::new("fullrelease").arg("--no-input").cwd(pkg_dir);
  run_checked(runner, &fullrelease).map_err(with_install_hint)?;
  Ok(())
}
