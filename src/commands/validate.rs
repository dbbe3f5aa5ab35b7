//! `relgate validate` - run validation phases for one package
//!
//! The orchestrator sequences the five phases. Preconditions are enforced by
//! the phases themselves; this layer only dispatches, and in `--all` mode
//! enforces strict ordering with fail-fast semantics: the first non-success
//! phase aborts the run, and cleanup deliberately does not happen on
//! failure so sandbox and build output stay available for inspection.

use crate::core::context::{PackageRef, RepoContext};
use crate::core::error::{GateError, GateResult, ValidationFailure};
use crate::phases;
use crate::pool::artifact::DistKind;
use crate::tools::{SystemRunner, ToolRunner};
use crate::ui::output;

/// Which phase(s) to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseSelector {
  Env,
  Build,
  Check,
  Test,
  Clean,
  All,
}

/// Validation options from the CLI
#[derive(Debug, Clone)]
pub struct ValidateOpts {
  /// Explicit threshold wins over relgate.toml, which wins over the default
  pub quality_threshold: Option<u32>,
  /// Artifact kind installed by the test phase
  pub kind: DistKind,
  pub verbose: bool,
}

/// Run the validate command
pub fn run_validate(ctx: &RepoContext, package: &str, selector: PhaseSelector, opts: &ValidateOpts) -> GateResult<()> {
  let pkg = ctx.package(package)?;

  // Pre-checks run before any phase and are setup errors even under --all
  if selector != PhaseSelector::Clean {
    pkg.require_manifest()?;
  }

  output::banner(&format!("Validating package: {}", pkg.name));
  println!("Package directory: {}", pkg.dir.display());

  let runner = SystemRunner::new(opts.verbose);
  let threshold = opts
    .quality_threshold
    .unwrap_or(ctx.config().check.quality_threshold);

  match selector {
    PhaseSelector::Env => phases::env::run(&pkg, &runner, opts.verbose),
    PhaseSelector::Build => phases::build::run(ctx, &pkg, &runner, opts.verbose),
    PhaseSelector::Check => phases::check::run(&pkg, threshold, &runner, opts.verbose),
    PhaseSelector::Test => phases::test::run(ctx, &pkg, opts.kind, &runner, opts.verbose),
    PhaseSelector::Clean => phases::clean::run(&pkg, opts.verbose),
    PhaseSelector::All => run_all(ctx, &pkg, threshold, opts, &runner),
  }
}

/// Run all phases in strict order with fail-fast semantics. A setup error
/// inside the sequence is a hard failure of the run (exit code 1), reported
/// as the aborted phase with its cause.
pub(crate) fn run_all(
  ctx: &RepoContext,
  pkg: &PackageRef,
  threshold: u32,
  opts: &ValidateOpts,
  runner: &dyn ToolRunner,
) -> GateResult<()> {
  let steps: [(&'static str, Box<dyn Fn() -> GateResult<()> + '_>); 5] = [
    ("env", Box::new(|| phases::env::run(pkg, runner, opts.verbose))),
    ("build", Box::new(|| phases::build::run(ctx, pkg, runner, opts.verbose))),
    ("check", Box::new(|| phases::check::run(pkg, threshold, runner, opts.verbose))),
    ("test", Box::new(|| phases::test::run(ctx, pkg, opts.kind, runner, opts.verbose))),
    ("clean", Box::new(|| phases::clean::run(pkg, opts.verbose))),
  ];

  for (name, step) in steps {
    if let Err(cause) = step() {
      output::error(&format!("Phase \"{}\" failed", name));
      return Err(GateError::Validation(ValidationFailure::PhaseAborted {
        phase: name,
        cause: Box::new(cause),
      }));
    }
  }

  println!();
  output::success("All phases completed successfully");
  Ok(())
}
