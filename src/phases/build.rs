//! build phase: produce one wheel and one sdist, promote both into the
//! shared pool, rewrite the pin file
//!
//! Only the package's local build output is cleared before building; the
//! shared pool is append-and-replace and survives across packages in the
//! run. A build backend that "succeeds" but omits either artifact kind is a
//! validation failure, not a success with a caveat.

use crate::core::context::{PackageRef, RepoContext};
use crate::core::error::{GateError, GateResult, ValidationFailure};
use crate::phases::{files_of_kind, require_sandbox};
use crate::pool::artifact::{Artifact, DistKind};
use crate::tools::{ToolRunner, python_module, run_checked};
use crate::ui::output;

pub fn run(ctx: &RepoContext, pkg: &PackageRef, runner: &dyn ToolRunner, verbose: bool) -> GateResult<()> {
  output::step(&format!("Phase: build - Building {}", pkg.name));

  let sandbox = require_sandbox(pkg)?;

  let dist = pkg.dist_dir();
  if dist.exists() {
    output::info("Removing previous build output", verbose);
    std::fs::remove_dir_all(&dist)?;
  }

  let build = python_module(&sandbox.python(), "build")
    .arg(pkg.dir.to_string_lossy().into_owned())
    .cwd(&pkg.dir);
  run_checked(runner, &build)?;

  let wheel_path = files_of_kind(&dist, DistKind::Wheel)?
    .into_iter()
    .next()
    .ok_or_else(|| {
      GateError::Validation(ValidationFailure::IncompleteBuild {
        package: pkg.name.clone(),
        missing: DistKind::Wheel,
      })
    })?;
  let sdist_path = files_of_kind(&dist, DistKind::Sdist)?
    .into_iter()
    .next()
    .ok_or_else(|| {
      GateError::Validation(ValidationFailure::IncompleteBuild {
        package: pkg.name.clone(),
        missing: DistKind::Sdist,
      })
    })?;

  let wheel = Artifact::from_build_output(&wheel_path)?;
  let sdist = Artifact::from_build_output(&sdist_path)?;
  output::success(&format!("Built wheel: {}", wheel.file_name));
  output::success(&format!("Built sdist: {}", sdist.file_name));

  let pool = ctx.pool();
  pool.promote(&[wheel.clone(), sdist.clone()], &dist)?;
  output::success(&format!(
    "Promoted {} and {} to {}",
    wheel.file_name,
    sdist.file_name,
    pool.dir().display()
  ));
  output::info(&format!("Pin file rewritten: {}", pool.pins_path().display()), verbose);

  Ok(())
}
