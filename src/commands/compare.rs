//! `relgate compare` - diff wheel and sdist contents for pooled artifacts
//!
//! Informational only: some differences are expected (tests and docs are
//! excluded from wheels), so the command reports and always exits zero.
//! Pairs are compared in parallel; this reporter is stateless.

use crate::compare::{ArchiveDiff, compare_wheel};
use crate::core::context::RepoContext;
use crate::core::error::GateResult;
use crate::phases::files_of_kind;
use crate::pool::artifact::DistKind;
use crate::ui::output;
use rayon::prelude::*;

/// Run the compare command
pub fn run_compare(ctx: &RepoContext, json: bool) -> GateResult<()> {
  let pool = ctx.pool();
  let wheels = files_of_kind(pool.dir(), DistKind::Wheel)?;

  if wheels.is_empty() {
    println!("No wheels in shared pool {}", pool.dir().display());
    return Ok(());
  }

  let results: Vec<(String, GateResult<ArchiveDiff>)> = wheels
    .par_iter()
    .map(|path| {
      let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default().to_string();
      let diff = compare_wheel(pool.dir(), &name);
      (name, diff)
    })
    .collect();

  if json {
    let diffs: Vec<&ArchiveDiff> = results.iter().filter_map(|(_, r)| r.as_ref().ok()).collect();
    println!("{}", serde_json::to_string_pretty(&diffs)?);
    return Ok(());
  }

  let mut issues_found = false;
  for (wheel_name, result) in &results {
    match result {
      Err(e) => {
        issues_found = true;
        print_package_header(wheel_name);
        output::error(&format!("  Cannot compare: {}", e));
      }
      Ok(diff) if diff.sdist.is_none() => {
        issues_found = true;
        print_package_header(&diff.package);
        output::error(&format!("  No sdist found for {}", diff.wheel));
      }
      Ok(diff) if !diff.clean() => {
        issues_found = true;
        print_package_header(&diff.package);
        println!("  Wheel: {}", diff.wheel);
        println!("  Sdist: {}", diff.sdist.as_deref().unwrap_or("-"));
        println!("  Wheel file count: {}", diff.wheel_count);
        println!("  Sdist file count: {}", diff.sdist_count);

        if !diff.wheel_only.is_empty() {
          println!("\n  FILES IN WHEEL BUT NOT IN SDIST ({}):", diff.wheel_only.len());
          for file in &diff.wheel_only {
            println!("    + {}", file);
          }
        }
        if !diff.sdist_only.is_empty() {
          println!("\n  FILES IN SDIST BUT NOT IN WHEEL ({}):", diff.sdist_only.len());
          for file in &diff.sdist_only {
            println!("    - {}", file);
          }
        }
      }
      Ok(_) => {}
    }
  }

  if issues_found {
    println!("\n{}", "=".repeat(60));
    println!("NOTE: Some differences are expected:");
    println!("  - Tests are typically excluded from wheels");
    println!("  - Documentation files are excluded from wheels");
    println!("  - Only package source files should be in both");
  } else {
    println!("All packages: wheel and sdist contents match (no issues found)");
  }

  Ok(())
}

fn print_package_header(package: &str) {
  println!("\n{}", "=".repeat(60));
  println!("PACKAGE: {}", package);
  println!("{}", "=".repeat(60));
}
