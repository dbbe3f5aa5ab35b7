//! clean phase: remove the package sandbox and local build output
//!
//! Idempotent and infallible: removal problems are logged as warnings, never
//! propagated, so cleanup can never be the reason a validation run reports
//! failure. The shared pool and pin file are left intact for downstream
//! packages.

use crate::core::context::PackageRef;
use crate::core::error::GateResult;
use crate::sandbox::Sandbox;
use crate::ui::output;

pub fn run(pkg: &PackageRef, verbose: bool) -> GateResult<()> {
  output::step(&format!("Phase: clean - Cleaning {}", pkg.name));

  let mut cleaned = Vec::new();

  let sandbox = Sandbox::for_package(pkg);
  if sandbox.path().exists() {
    output::info(&format!("Removing sandbox: {}", sandbox.path().display()), verbose);
    match sandbox.destroy() {
      Ok(()) => cleaned.push("sandbox"),
      Err(e) => output::warn(&format!("Failed to remove sandbox: {}", e)),
    }
  }

  let dist = pkg.dist_dir();
  if dist.exists() {
    output::info(&format!("Removing build output: {}", dist.display()), verbose);
    match std::fs::remove_dir_all(&dist) {
      Ok(()) => cleaned.push("build output"),
      Err(e) => output::warn(&format!("Failed to remove build output: {}", e)),
    }
  }

  if cleaned.is_empty() {
    output::info("Nothing to clean", verbose);
  } else {
    output::success(&format!("Cleaned: {}", cleaned.join(", ")));
  }

  Ok(())
}
