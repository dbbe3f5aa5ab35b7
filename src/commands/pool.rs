//! `relgate pool` - inspect or reset the shared artifact pool
//!
//! `list` shows the registry's records; `reset` is the explicit whole-run
//! clear (per-package cleanup never touches the pool).

use crate::core::context::RepoContext;
use crate::core::error::GateResult;
use crate::ui::output;

/// Run `pool list`
pub fn run_pool_list(ctx: &RepoContext, json: bool) -> GateResult<()> {
  let pool = ctx.pool();
  let registry = pool.load_registry()?;

  if json {
    println!("{}", serde_json::to_string_pretty(&registry)?);
    return Ok(());
  }

  if registry.artifacts.is_empty() {
    println!("Shared pool is empty: {}", pool.dir().display());
    return Ok(());
  }

  output::banner(&format!("Shared pool: {}", pool.dir().display()));
  if let Some(updated) = &registry.updated_at {
    println!("Last promotion: {}", updated);
  }
  println!();

  let mut artifacts = registry.artifacts.clone();
  artifacts.sort_by(|a, b| (&a.package, a.kind as u8).cmp(&(&b.package, b.kind as u8)));
  for artifact in &artifacts {
    println!(
      "  📦 {} {} ({})  {}  sha256:{}",
      artifact.package,
      artifact.version,
      artifact.kind,
      artifact.file_name,
      &artifact.sha256[..12.min(artifact.sha256.len())]
    );
  }

  if pool.has_pins() {
    println!();
    println!("Pin file: {}", pool.pins_path().display());
  }

  Ok(())
}

/// Run `pool reset`
pub fn run_pool_reset(ctx: &RepoContext) -> GateResult<()> {
  let pool = ctx.pool();
  pool.reset()?;
  output::success(&format!("Shared pool reset: {} and {} removed", pool.dir().display(), pool.pins_path().display()));
  Ok(())
}
