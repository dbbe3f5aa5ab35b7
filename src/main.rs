mod commands;
mod compare;
mod core;
mod phases;
mod pool;
mod release;
mod sandbox;
mod tools;
mod ui;

use clap::{ArgGroup, Parser, Subcommand};
use crate::core::context::RepoContext;
use crate::core::error::{ExitCode, GateError, print_error};
use crate::pool::artifact::DistKind;

/// Validate and release packages from a multi-package repository
#[derive(Parser)]
#[command(name = "relgate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Validate one package: build artifacts, check them, install and test
  /// them in an isolated sandbox
  #[command(group(ArgGroup::new("phase").required(true).multiple(false)))]
  Validate {
    /// Package name (directory under sources/)
    package: String,

    /// Create the sandbox and install the validation tool-chain
    #[arg(long, group = "phase")]
    env: bool,
    /// Build wheel and sdist, promote into the shared pool (requires --env)
    #[arg(long, group = "phase")]
    build: bool,
    /// Run metadata and quality checks (requires --env and --build)
    #[arg(long, group = "phase")]
    check: bool,
    /// Install the promoted artifact and run tests (requires --env and --build)
    #[arg(long, group = "phase")]
    test: bool,
    /// Remove the sandbox and local build output
    #[arg(long, group = "phase")]
    clean: bool,
    /// Run all phases: env, build, check, test, clean
    #[arg(long, group = "phase")]
    all: bool,

    /// Minimum quality score (default: 8, or [check] in relgate.toml)
    #[arg(long, value_name = "SCORE")]
    quality_threshold: Option<u32>,
    /// Artifact kind installed for testing
    #[arg(long, value_enum, default_value_t = DistKind::Wheel)]
    kind: DistKind,
    /// Show detailed output
    #[arg(short, long)]
    verbose: bool,
  },

  /// Compare wheel and sdist contents for every pooled artifact
  Compare {
    /// Output the report in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Release packages whose changelogs have unreleased entries
  Release {
    /// Show what would be released without doing it
    #[arg(long)]
    dry_run: bool,
    /// List packages needing release and exit
    #[arg(long = "list")]
    list_only: bool,
    /// Release only the specified package (can be repeated)
    #[arg(long = "package", value_name = "PKG")]
    packages: Vec<String>,
    /// Skip the specified package (can be repeated)
    #[arg(long = "skip", value_name = "PKG")]
    skip: Vec<String>,
    /// Prepare and tag the release but do not upload
    #[arg(long)]
    no_upload: bool,
    /// Show detailed output
    #[arg(short, long)]
    verbose: bool,
  },

  /// Inspect or reset the shared artifact pool
  #[command(subcommand)]
  Pool(PoolCommands),
}

#[derive(Subcommand)]
enum PoolCommands {
  /// Show pooled artifacts and the pin file location
  List {
    /// Output the registry in JSON format
    #[arg(long)]
    json: bool,
  },
  /// Remove the pool directory, registry, and pin file (whole-run reset)
  Reset,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(ExitCode::Setup.as_i32());
    }
  };

  // Build repository context once (loads relgate.toml or defaults)
  let ctx = match RepoContext::load(&root) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Validate {
      package,
      env,
      build,
      check,
      test,
      clean,
      all,
      quality_threshold,
      kind,
      verbose,
    } => {
      let selector = phase_selector(env, build, check, test, clean, all);
      let opts = commands::ValidateOpts {
        quality_threshold,
        kind,
        verbose,
      };
      commands::run_validate(&ctx, &package, selector, &opts)
    }
    Commands::Compare { json } => commands::run_compare(&ctx, json),
    Commands::Release {
      dry_run,
      list_only,
      packages,
      skip,
      no_upload,
      verbose,
    } => commands::run_release(&ctx, &commands::ReleaseOpts {
      dry_run,
      list_only,
      packages,
      skip,
      no_upload,
      verbose,
    }),
    Commands::Pool(pool_cmd) => match pool_cmd {
      PoolCommands::List { json } => commands::run_pool_list(&ctx, json),
      PoolCommands::Reset => commands::run_pool_reset(&ctx),
    },
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

/// Exactly one phase flag is set (clap enforces the group)
fn phase_selector(env: bool, build: bool, check: bool, test: bool, clean: bool, all: bool) -> commands::PhaseSelector {
  match (env, build, check, test, clean, all) {
    (true, ..) => commands::PhaseSelector::Env,
    (_, true, ..) => commands::PhaseSelector::Build,
    (_, _, true, ..) => commands::PhaseSelector::Check,
    (_, _, _, true, ..) => commands::PhaseSelector::Test,
    (_, _, _, _, true, _) => commands::PhaseSelector::Clean,
    _ => commands::PhaseSelector::All,
  }
}

fn handle_error(err: GateError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
