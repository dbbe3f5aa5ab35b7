//! The five validation phases
//!
//! Each phase checks its own preconditions at entry and returns a typed
//! setup error when a prerequisite phase has not produced the state it
//! needs. That keeps every phase independently invocable and resumable:
//!
//! - **env**: destroy and recreate the package sandbox, install the
//!   validation tool-chain
//! - **build**: build wheel + sdist, promote into the shared pool, rewrite
//!   the pin file
//! - **check**: metadata validation and quality score gate
//! - **test**: install the promoted artifact and run the package tests
//! - **clean**: remove sandbox and local build output (never the pool)

pub mod build;
pub mod check;
pub mod clean;
pub mod env;

use crate::core::context::PackageRef;
use crate::core::error::{GateError, GateResult, SetupError};
use crate::pool::ArtifactPool;
use crate::pool::artifact::{Artifact, DistKind};
use crate::sandbox::Sandbox;
use std::path::{Path, PathBuf};

/// The sandbox produced by the env phase, or a typed setup error
pub fn require_sandbox(pkg: &PackageRef) -> GateResult<Sandbox> {
  let sandbox = Sandbox::for_package(pkg);
  if !sandbox.exists() {
    return Err(GateError::Setup(SetupError::SandboxMissing {
      package: pkg.name.clone(),
      path: sandbox.path().to_path_buf(),
    }));
  }
  Ok(sandbox)
}

/// The local build output produced by the build phase, or a typed setup error
pub fn require_build_output(pkg: &PackageRef) -> GateResult<PathBuf> {
  let dist = pkg.dist_dir();
  if !dist.is_dir() {
    return Err(GateError::Setup(SetupError::BuildOutputMissing {
      package: pkg.name.clone(),
      path: dist,
    }));
  }
  Ok(dist)
}

/// The pooled artifact promoted by the build phase, or a typed setup error.
/// Also requires the pin file, which every build phase rewrites.
pub fn require_pooled_artifact(pool: &ArtifactPool, pkg: &PackageRef, kind: DistKind) -> GateResult<Artifact> {
  let not_pooled = || {
    GateError::Setup(SetupError::ArtifactNotPooled {
      package: pkg.name.clone(),
      kind,
      pool: pool.dir().to_path_buf(),
    })
  };

  let artifact = pool.find(&pkg.name, kind)?.ok_or_else(not_pooled)?;
  if !pool.artifact_path(&artifact).is_file() {
    return Err(not_pooled());
  }

  if !pool.has_pins() {
    return Err(GateError::Setup(SetupError::PinsMissing {
      path: pool.pins_path().to_path_buf(),
    }));
  }

  Ok(artifact)
}

/// Distribution files (wheels and sdists) in a directory, sorted by name
pub fn distribution_files(dir: &Path) -> GateResult<Vec<PathBuf>> {
  let mut files = Vec::new();
  if !dir.is_dir() {
    return Ok(files);
  }

  for entry in std::fs::read_dir(dir)? {
    let path = entry?.path();
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
      continue;
    };
    if DistKind::of_file(name).is_some() {
      files.push(path);
    }
  }

  files.sort();
  Ok(files)
}

/// Distribution files of one kind, sorted by name
pub fn files_of_kind(dir: &Path, kind: DistKind) -> GateResult<Vec<PathBuf>> {
  Ok(
    distribution_files(dir)?
      .into_iter()
      .filter(|p| {
        p.file_name()
          .and_then(|n| n.to_str())
          .and_then(DistKind::of_file)
          == Some(kind)
      })
      .collect(),
  )
}
