//! Pending-release detection from CHANGES.rst
//!
//! A package needs a release when its changelog has an `(unreleased)`
//! version section, underlined with dashes, that contains real bullet
//! entries. The release tool writes a `Nothing changed yet.` placeholder
//! after each release; a section holding only that marker is not pending.

/// Placeholder entry the release tool leaves in a fresh unreleased section
pub const NOTHING_CHANGED_YET: &str = "Nothing changed yet.";

/// Outcome of scanning one changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangesStatus {
  /// Unreleased section with real entries
  Ready { version: String },
  /// No `(unreleased)` section at all
  NoUnreleasedSection,
  /// Unreleased section holds only the placeholder
  NothingChangedYet { version: String },
  /// Unreleased section has no bullet entries
  EmptySection { version: String },
}

impl ChangesStatus {
  pub fn ready(&self) -> bool {
    matches!(self, ChangesStatus::Ready { .. })
  }

  pub fn version(&self) -> Option<&str> {
    match self {
      ChangesStatus::Ready { version }
      | ChangesStatus::NothingChangedYet { version }
      | ChangesStatus::EmptySection { version } => Some(version),
      ChangesStatus::NoUnreleasedSection => None,
    }
  }

  pub fn reason(&self) -> &'static str {
    match self {
      ChangesStatus::Ready { .. } => "Has unreleased changes",
      ChangesStatus::NoUnreleasedSection => "No unreleased section in CHANGES.rst",
      ChangesStatus::NothingChangedYet { .. } => "No changes yet",
      ChangesStatus::EmptySection { .. } => "Unreleased section is empty",
    }
  }
}

/// Scan changelog content for an unreleased section with entries
pub fn scan_changes(content: &str) -> ChangesStatus {
  let lines: Vec<&str> = content.lines().collect();

  for (i, line) in lines.iter().enumerate() {
    let Some(version) = unreleased_header(line) else {
      continue;
    };
    if !matches!(lines.get(i + 1), Some(next) if is_underline(next)) {
      continue;
    }

    // Section body runs until the next underlined version header or EOF
    let mut body = Vec::new();
    let mut j = i + 2;
    while j < lines.len() {
      if starts_new_section(&lines, j) {
        break;
      }
      body.push(lines[j]);
      j += 1;
    }

    if body.iter().any(|l| l.contains(NOTHING_CHANGED_YET)) {
      return ChangesStatus::NothingChangedYet { version };
    }
    if !body.iter().any(|l| is_entry(l)) {
      return ChangesStatus::EmptySection { version };
    }
    return ChangesStatus::Ready { version };
  }

  ChangesStatus::NoUnreleasedSection
}

/// `X.Y (unreleased)` or `X.Y.Z (unreleased)` header line
fn unreleased_header(line: &str) -> Option<String> {
  let version = line.trim().strip_suffix("(unreleased)")?.trim_end();
  let components: Vec<&str> = version.split('.').collect();
  let valid = (2..=3).contains(&components.len())
    && components
      .iter()
      .all(|c| !c.is_empty() && c.chars().all(|ch| ch.is_ascii_digit()));
  valid.then(|| version.to_string())
}

fn is_underline(line: &str) -> bool {
  let trimmed = line.trim_end();
  !trimmed.is_empty() && trimmed.chars().all(|c| c == '-')
}

/// A version header followed by a dash underline opens the next section
fn starts_new_section(lines: &[&str], index: usize) -> bool {
  let line = lines[index].trim();
  line.chars().next().is_some_and(|c| c.is_ascii_digit())
    && matches!(lines.get(index + 1), Some(next) if is_underline(next))
}

fn is_entry(line: &str) -> bool {
  let trimmed = line.trim_start();
  trimmed.starts_with("- ") && trimmed.len() > 2
}
