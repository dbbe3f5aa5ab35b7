//! Error types for relgate with contextual messages and exit codes
//!
//! Failures fall into three kinds that are never conflated: a setup error
//! means a prerequisite phase was not run (the operator can fix it), a
//! validation failure means the package failed a gate (the signal this tool
//! exists to produce), and a tool error means an external checker misbehaved
//! in a way unrelated to the quality judgment.

use crate::pool::artifact::DistKind;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for relgate errors (success is the absence of one)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// Validation failure (build, metadata, quality, install, tests)
  Validation = 1,
  /// Setup error (missing prerequisite phase, bad arguments, broken config)
  Setup = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for relgate
#[derive(Debug)]
pub enum GateError {
  /// A prerequisite phase was never run, or required state is absent
  Setup(SetupError),

  /// The package failed a validation gate
  Validation(ValidationFailure),

  /// An external tool errored outside the actual quality judgment
  Tool(ToolError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional help
  Message { message: String, help: Option<String> },
}

impl GateError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    GateError::Message {
      message: msg.into(),
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    GateError::Message {
      message: msg.into(),
      help: Some(help.into()),
    }
  }

  /// Prepend context to a message-style error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      GateError::Message { message, help } => GateError::Message {
        message: format!("{}\n{}", ctx_str, message),
        help,
      },
      other => other,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      GateError::Setup(_) => ExitCode::Setup,
      GateError::Validation(_) => ExitCode::Validation,
      GateError::Tool(_) => ExitCode::Validation,
      GateError::Io(_) => ExitCode::Setup,
      GateError::Message { .. } => ExitCode::Setup,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      GateError::Setup(e) => e.help_message(),
      GateError::Validation(e) => e.help_message(),
      GateError::Tool(_) => None,
      GateError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for GateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GateError::Setup(e) => write!(f, "{}", e),
      GateError::Validation(e) => write!(f, "{}", e),
      GateError::Tool(e) => write!(f, "{}", e),
      GateError::Io(e) => write!(f, "I/O error: {}", e),
      GateError::Message { message, .. } => write!(f, "{}", message),
    }
  }
}

impl std::error::Error for GateError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      GateError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for GateError {
  fn from(err: io::Error) -> Self {
    GateError::Io(err)
  }
}

impl From<String> for GateError {
  fn from(msg: String) -> Self {
    GateError::message(msg)
  }
}

impl From<&str> for GateError {
  fn from(msg: &str) -> Self {
    GateError::message(msg)
  }
}

impl From<toml_edit::TomlError> for GateError {
  fn from(err: toml_edit::TomlError) -> Self {
    GateError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for GateError {
  fn from(err: toml_edit::de::Error) -> Self {
    GateError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for GateError {
  fn from(err: serde_json::Error) -> Self {
    GateError::message(format!("JSON error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for GateError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    GateError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<zip::result::ZipError> for GateError {
  fn from(err: zip::result::ZipError) -> Self {
    GateError::message(format!("Wheel archive error: {}", err))
  }
}

/// Convert anyhow::Error to GateError (test helpers use anyhow)
impl From<anyhow::Error> for GateError {
  fn from(err: anyhow::Error) -> Self {
    GateError::message(err.to_string())
  }
}

/// Setup errors: a required prior phase was never run, or a prerequisite
/// file/directory is absent. Recoverable by re-running the phase sequence.
#[derive(Debug)]
pub enum SetupError {
  /// Package directory not found under sources/
  PackageNotFound { name: String, path: PathBuf },

  /// Package has no pyproject.toml
  ManifestMissing { name: String, path: PathBuf },

  /// Sandbox does not exist for the package
  SandboxMissing { package: String, path: PathBuf },

  /// Local build output directory does not exist
  BuildOutputMissing { package: String, path: PathBuf },

  /// No pooled artifact of the requested kind for the package
  ArtifactNotPooled {
    package: String,
    kind: DistKind,
    pool: PathBuf,
  },

  /// Pin file is absent even though the pool has artifacts
  PinsMissing { path: PathBuf },

  /// relgate.toml is present but invalid
  Config { message: String },
}

impl SetupError {
  fn help_message(&self) -> Option<String> {
    match self {
      SetupError::PackageNotFound { name, .. } => Some(format!(
        "Package directories live under sources/. Check the spelling of '{}'.",
        name
      )),
      SetupError::ManifestMissing { .. } => {
        Some("Every validated package needs a pyproject.toml at its root.".to_string())
      }
      SetupError::SandboxMissing { package, .. } => {
        Some(format!("Run `relgate validate {} --env` first.", package))
      }
      SetupError::BuildOutputMissing { package, .. } => {
        Some(format!("Run `relgate validate {} --build` first.", package))
      }
      SetupError::ArtifactNotPooled { package, .. } => Some(format!(
        "Run `relgate validate {} --build` to promote artifacts into the pool.",
        package
      )),
      SetupError::PinsMissing { .. } => {
        Some("The pin file is rewritten by every build phase. Re-run --build.".to_string())
      }
      SetupError::Config { .. } => Some("Fix relgate.toml or remove it to fall back to defaults.".to_string()),
    }
  }
}

impl fmt::Display for SetupError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SetupError::PackageNotFound { name, path } => {
        write!(f, "Package '{}' not found at {}", name, path.display())
      }
      SetupError::ManifestMissing { name, path } => {
        write!(f, "Package '{}' has no pyproject.toml at {}", name, path.display())
      }
      SetupError::SandboxMissing { package, path } => {
        write!(f, "Sandbox for '{}' not found: {}", package, path.display())
      }
      SetupError::BuildOutputMissing { package, path } => {
        write!(f, "Build output for '{}' not found: {}", package, path.display())
      }
      SetupError::ArtifactNotPooled { package, kind, pool } => {
        write!(f, "No {} artifact for '{}' in shared pool {}", kind, package, pool.display())
      }
      SetupError::PinsMissing { path } => {
        write!(f, "Pin file not found: {}", path.display())
      }
      SetupError::Config { message } => {
        write!(f, "Invalid relgate.toml: {}", message)
      }
    }
  }
}

/// Validation failures: the package itself failed a gate
#[derive(Debug)]
pub enum ValidationFailure {
  /// External command exited non-zero; captured output is part of the report
  CommandFailed {
    command: String,
    code: Option<i32>,
    stdout: String,
    stderr: String,
  },

  /// Build backend reported success but an artifact kind is missing
  IncompleteBuild { package: String, missing: DistKind },

  /// Sandbox runtime absent immediately after creation
  EnvironmentDefect { message: String },

  /// Copying artifacts into the shared pool failed
  PromotionFailed { message: String },

  /// Quality score below the configured threshold
  ScoreBelowThreshold { score: u32, threshold: u32 },

  /// One or more packages failed to release
  ReleasesFailed { failed: Vec<String> },

  /// A phase aborted an --all run; the cause keeps its own taxonomy in the
  /// message while the run itself is a hard failure
  PhaseAborted { phase: &'static str, cause: Box<GateError> },
}

impl ValidationFailure {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationFailure::IncompleteBuild { .. } => {
        Some("The build backend must produce one wheel and one sdist per build.".to_string())
      }
      ValidationFailure::ScoreBelowThreshold { threshold, .. } => Some(format!(
        "Improve the package metadata or lower --quality-threshold (currently {}).",
        threshold
      )),
      ValidationFailure::PhaseAborted { cause, .. } => cause.help_message(),
      _ => None,
    }
  }
}

impl fmt::Display for ValidationFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationFailure::CommandFailed {
        command,
        code,
        stdout,
        stderr,
      } => {
        match code {
          Some(code) => write!(f, "Command failed with exit code {}: {}", code, command)?,
          None => write!(f, "Command terminated by signal: {}", command)?,
        }
        if !stdout.trim().is_empty() {
          write!(f, "\n--- stdout ---\n{}", stdout.trim_end())?;
        }
        if !stderr.trim().is_empty() {
          write!(f, "\n--- stderr ---\n{}", stderr.trim_end())?;
        }
        Ok(())
      }
      ValidationFailure::IncompleteBuild { package, missing } => {
        write!(f, "Build of '{}' succeeded but produced no {} artifact", package, missing)
      }
      ValidationFailure::EnvironmentDefect { message } => {
        write!(f, "Sandbox environment defect: {}", message)
      }
      ValidationFailure::PromotionFailed { message } => {
        write!(f, "Failed to promote artifacts into the shared pool: {}", message)
      }
      ValidationFailure::ScoreBelowThreshold { score, threshold } => {
        write!(f, "Quality score {}/10 below threshold {}", score, threshold)
      }
      ValidationFailure::ReleasesFailed { failed } => {
        write!(f, "Release failed for {} package(s): {}", failed.len(), failed.join(", "))
      }
      ValidationFailure::PhaseAborted { phase, cause } => {
        write!(f, "Phase \"{}\" failed: {}", phase, cause)
      }
    }
  }
}

/// Tool errors: an external checker misbehaved outside the quality judgment.
/// Logged leniently; never blocks a release on its own.
#[derive(Debug)]
pub struct ToolError {
  pub tool: String,
  pub message: String,
}

impl fmt::Display for ToolError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Tool '{}' errored: {}", self.tool, self.message)
  }
}

/// Result type alias for relgate
pub type GateResult<T> = Result<T, GateError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> GateResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<GateError>,
{
  fn context(self, ctx: impl Into<String>) -> GateResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> GateResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &GateError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
