//! External tool invocation
//!
//! Every collaborator (build backend, metadata checker, quality checker,
//! installer, test runner, release tool) is reached through the
//! [`ToolRunner`] trait so phase logic can be exercised against a scripted
//! double. The production [`SystemRunner`] shells out synchronously with
//! captured output and no timeout; a hang in an external tool hangs the
//! phase.

use crate::core::error::{GateError, GateResult, ValidationFailure};
use crate::ui::output;
use std::path::{Path, PathBuf};
use std::process::Command;

#[cfg(test)]
pub mod script;

/// A fully-specified external command invocation
#[derive(Debug, Clone)]
pub struct CommandSpec {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: Option<PathBuf>,
  pub env: Vec<(String, String)>,
}

impl CommandSpec {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: None,
      env: Vec::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
    self.cwd = Some(dir.into());
    self
  }

  pub fn envs<I, K, V>(mut self, vars: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    self.env.extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
    self
  }

  /// Render the command line for display and error reports
  pub fn display(&self) -> String {
    let mut parts = vec![self.program.clone()];
    parts.extend(self.args.iter().cloned());
    parts.join(" ")
  }
}

/// Captured result of an external command
#[derive(Debug, Clone)]
pub struct ToolOutput {
  /// Exit code, None when terminated by a signal
  pub code: Option<i32>,
  pub stdout: String,
  pub stderr: String,
}

impl ToolOutput {
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Seam for external tool invocation
pub trait ToolRunner {
  /// Run a command to completion, capturing output. Spawn failures are
  /// errors; a non-zero exit is a normal return (callers decide policy).
  fn run(&self, spec: &CommandSpec) -> GateResult<ToolOutput>;
}

/// Production runner: synchronous std::process invocation
pub struct SystemRunner {
  pub verbose: bool,
}

impl SystemRunner {
  pub fn new(verbose: bool) -> Self {
    Self { verbose }
  }
}

impl ToolRunner for SystemRunner {
  fn run(&self, spec: &CommandSpec) -> GateResult<ToolOutput> {
    if self.verbose {
      output::info(&format!("Running: {}", spec.display()), true);
    }

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);
    if let Some(cwd) = &spec.cwd {
      cmd.current_dir(cwd);
    }
    for (key, value) in &spec.env {
      cmd.env(key, value);
    }

    let out = cmd
      .output()
      .map_err(|e| GateError::message(format!("Failed to execute {}: {}", spec.program, e)))?;

    let result = ToolOutput {
      code: out.status.code(),
      stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
    };

    if self.verbose && !result.stdout.is_empty() {
      println!("{}", result.stdout);
    }

    Ok(result)
  }
}

/// Run a command and map a non-zero exit to a validation failure carrying
/// the command line and captured output
pub fn run_checked(runner: &dyn ToolRunner, spec: &CommandSpec) -> GateResult<ToolOutput> {
  let out = runner.run(spec)?;
  if !out.success() {
    return Err(GateError::Validation(ValidationFailure::CommandFailed {
      command: spec.display(),
      code: out.code,
      stdout: out.stdout,
      stderr: out.stderr,
    }));
  }
  Ok(out)
}

/// Base interpreter used to create sandboxes
pub fn base_python() -> &'static str {
  if cfg!(windows) { "python" } else { "python3" }
}

/// Spec for invoking a module of the sandbox interpreter
pub fn python_module(python: &Path, module: &str) -> CommandSpec {
  CommandSpec::new(python.to_string_lossy().into_owned()).arg("-m").arg(module)
}
