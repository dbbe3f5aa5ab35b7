//! check phase: metadata validation and quality score gate
//!
//! The metadata check is a hard pass/fail and short-circuits the phase. The
//! quality score is strict when a score can be read and lenient about
//! everything else: an unparseable rating or a checker crash never blocks a
//! release, a parsed below-threshold score always does.

use crate::core::context::PackageRef;
use crate::core::error::{GateError, GateResult, SetupError, ToolError, ValidationFailure};
use crate::phases::{distribution_files, require_build_output, require_sandbox};
use crate::tools::{ToolRunner, python_module, run_checked};
use crate::ui::output;

pub fn run(pkg: &PackageRef, threshold: u32, runner: &dyn ToolRunner, verbose: bool) -> GateResult<()> {
  output::step(&format!("Phase: check - Validating {}", pkg.name));

  let sandbox = require_sandbox(pkg)?;
  let dist = require_build_output(pkg)?;

  let files = distribution_files(&dist)?;
  if files.is_empty() {
    return Err(GateError::Setup(SetupError::BuildOutputMissing {
      package: pkg.name.clone(),
      path: dist,
    }));
  }

  output::info("Running twine check", verbose);
  let twine = python_module(&sandbox.python(), "twine")
    .arg("check")
    .args(files.iter().map(|p| p.to_string_lossy().into_owned()))
    .cwd(&pkg.dir);
  run_checked(runner, &twine)?;
  output::success("Metadata validation passed (twine)");

  output::info(&format!("Running pyroma (threshold: {}/10)", threshold), verbose);
  let pyroma = python_module(&sandbox.python(), "pyroma").arg(".").cwd(&pkg.dir);
  let out = runner.run(&pyroma)?;

  match parse_rating(&out.stdout) {
    Some(score) => {
      output::success(&format!("Quality score: {}/10", score));
      if score < threshold {
        return Err(GateError::Validation(ValidationFailure::ScoreBelowThreshold {
          score,
          threshold,
        }));
      }
    }
    None if out.success() => {
      output::success("Quality check completed (score not parsed)");
    }
    None => {
      // Checker instability must not become a release blocker
      let code = out.code.map_or_else(|| "signal".to_string(), |c| c.to_string());
      let tool = GateError::Tool(ToolError {
        tool: "pyroma".to_string(),
        message: format!("exit code {}", code),
      });
      output::warn(&format!("{}; continuing without a score", tool));
      if verbose && !out.stderr.is_empty() {
        println!("{}", out.stderr);
      }
    }
  }

  output::success("Quality checks passed");
  Ok(())
}

/// Extract a quality score from checker output by scanning for a
/// `rating: N/10` line (case-insensitive). The last match wins.
pub fn parse_rating(stdout: &str) -> Option<u32> {
  let mut score = None;
  for line in stdout.lines() {
    let lower = line.to_lowercase();
    if !lower.contains("rating:") || !lower.contains("/10") {
      continue;
    }
    let Some((_, rest)) = lower.split_once(':') else {
      continue;
    };
    let Some(number) = rest.split("/10").next() else {
      continue;
    };
    if let Ok(value) = number.trim().parse::<u32>() {
      score = Some(value);
    }
  }
  score
}
