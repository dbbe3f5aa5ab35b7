//! Styled console output for validation runs
//!
//! Colors are disabled automatically when stdout is not a TTY, so captured
//! CI logs stay clean.

use anstyle::{AnsiColor, Color, Style};
use std::io::IsTerminal;
use std::sync::OnceLock;

const HEADER: Style = Style::new()
  .bold()
  .fg_color(Some(Color::Ansi(AnsiColor::Magenta)));
const GREEN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
const RED: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));
const YELLOW: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
const CYAN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
const BOLD: Style = Style::new().bold();

fn colors_enabled() -> bool {
  static ENABLED: OnceLock<bool> = OnceLock::new();
  *ENABLED.get_or_init(|| std::io::stdout().is_terminal())
}

fn paint(style: Style, text: &str) -> String {
  if colors_enabled() {
    format!("{}{}{}", style.render(), text, style.render_reset())
  } else {
    text.to_string()
  }
}

/// Print a phase/step header
pub fn step(message: &str) {
  println!("\n{}", paint(HEADER, &format!("=== {} ===", message)));
}

/// Print a success line
pub fn success(message: &str) {
  println!("{}", paint(GREEN, &format!("✓ {}", message)));
}

/// Print an error line to stderr
pub fn error(message: &str) {
  eprintln!("{}", paint(RED, &format!("✗ {}", message)));
}

/// Print a warning line
pub fn warn(message: &str) {
  println!("{}", paint(YELLOW, &format!("Warning: {}", message)));
}

/// Print an info line (verbose mode only)
pub fn info(message: &str, verbose: bool) {
  if verbose {
    println!("{}", paint(CYAN, message));
  }
}

/// Print a bold banner line
pub fn banner(message: &str) {
  println!("{}", paint(BOLD, message));
}
