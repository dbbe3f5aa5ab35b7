//! env phase: produce a clean, reproducible sandbox for one package
//!
//! Any pre-existing sandbox is destroyed unconditionally, so repeated runs
//! can never leak state from a prior failed validation. Only the validation
//! tool-chain is installed here; the package itself is installed from its
//! built artifact in the test phase.

use crate::core::context::PackageRef;
use crate::core::error::{GateError, GateResult, ValidationFailure};
use crate::sandbox::Sandbox;
use crate::tools::{CommandSpec, ToolRunner, base_python, python_module, run_checked};
use crate::ui::output;

/// Tools installed into every sandbox
pub const TOOLCHAIN: [&str; 3] = ["build", "pyroma", "twine"];

pub fn run(pkg: &PackageRef, runner: &dyn ToolRunner, verbose: bool) -> GateResult<()> {
  output::step(&format!("Phase: env - Creating sandbox for {}", pkg.name));

  let sandbox = Sandbox::for_package(pkg);

  if sandbox.path().exists() {
    output::info(&format!("Removing existing sandbox: {}", sandbox.path().display()), verbose);
  }
  sandbox.destroy().map_err(|e| {
    GateError::Validation(ValidationFailure::EnvironmentDefect {
      message: format!("cannot remove {}: {}", sandbox.path().display(), e),
    })
  })?;

  output::info(&format!("Creating sandbox: {}", sandbox.path().display()), verbose);
  let create = CommandSpec::new(base_python())
    .arg("-m")
    .arg("venv")
    .arg(sandbox.path().to_string_lossy().into_owned());
  run_checked(runner, &create)?;

  if !sandbox.exists() {
    return Err(GateError::Validation(ValidationFailure::EnvironmentDefect {
      message: format!("interpreter missing after creation: {}", sandbox.python().display()),
    }));
  }

  output::info("Upgrading pip in sandbox", verbose);
  let upgrade = python_module(&sandbox.python(), "pip").args(["install", "--upgrade", "pip"]);
  run_checked(runner, &upgrade)?;

  output::info(&format!("Installing {}", TOOLCHAIN.join(", ")), verbose);
  let install = python_module(&sandbox.python(), "pip").arg("install").args(TOOLCHAIN);
  run_checked(runner, &install)?;

  output::success(&format!("Sandbox ready at {}", sandbox.path().display()));
  Ok(())
}
