//! Scripted tool runner for tests
//!
//! Matches command lines by substring and replays canned responses; every
//! invocation is recorded so tests can assert on exact arguments, working
//! directories, and injected environments. Rules run in registration order,
//! first match wins, and unmatched commands succeed with empty output.

use crate::core::error::GateResult;
use crate::tools::{CommandSpec, ToolOutput, ToolRunner};
use std::cell::RefCell;

type Response = Box<dyn Fn(&CommandSpec) -> GateResult<ToolOutput>>;

struct Rule {
  needle: String,
  respond: Response,
}

/// Test double for [`ToolRunner`]
pub struct ScriptedRunner {
  rules: RefCell<Vec<Rule>>,
  calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
  pub fn new() -> Self {
    Self {
      rules: RefCell::new(Vec::new()),
      calls: RefCell::new(Vec::new()),
    }
  }

  /// Register a closure invoked when the rendered command line contains
  /// `needle`; the closure may create files to simulate tool side effects
  pub fn on<F>(&self, needle: &str, respond: F)
  where
    F: Fn(&CommandSpec) -> GateResult<ToolOutput> + 'static,
  {
    self.rules.borrow_mut().push(Rule {
      needle: needle.to_string(),
      respond: Box::new(respond),
    });
  }

  /// Succeed with the given stdout when the command line matches
  pub fn succeed_on(&self, needle: &str, stdout: &str) {
    let stdout = stdout.to_string();
    self.on(needle, move |_| {
      Ok(ToolOutput {
        code: Some(0),
        stdout: stdout.clone(),
        stderr: String::new(),
      })
    });
  }

  /// Fail with the given exit code and output when the command line matches
  pub fn fail_on(&self, needle: &str, code: i32, stdout: &str, stderr: &str) {
    let stdout = stdout.to_string();
    let stderr = stderr.to_string();
    self.on(needle, move |_| {
      Ok(ToolOutput {
        code: Some(code),
        stdout: stdout.clone(),
        stderr: stderr.clone(),
      })
    });
  }

  /// Respond to `-m venv <path>` by creating the interpreter file, so the
  /// env phase sees a live sandbox
  pub fn provide_venv(&self) {
    self.on("-m venv", |spec| {
      let root = std::path::PathBuf::from(spec.args.last().unwrap());
      let python = if cfg!(windows) {
        root.join("Scripts").join("python.exe")
      } else {
        root.join("bin").join("python")
      };
      std::fs::create_dir_all(python.parent().unwrap()).unwrap();
      std::fs::write(python, "").unwrap();
      Ok(ToolOutput {
        code: Some(0),
        stdout: String::new(),
        stderr: String::new(),
      })
    });
  }

  /// Respond to `-m build <dir>` by writing the given files into the
  /// package's dist/ directory
  pub fn provide_build_output(&self, files: &[&str]) {
    let files: Vec<String> = files.iter().map(|s| s.to_string()).collect();
    self.on("-m build", move |spec| {
      let pkg_dir = std::path::PathBuf::from(spec.args.last().unwrap());
      let dist = pkg_dir.join("dist");
      std::fs::create_dir_all(&dist).unwrap();
      for name in &files {
        std::fs::write(dist.join(name), name.as_bytes()).unwrap();
      }
      Ok(ToolOutput {
        code: Some(0),
        stdout: String::new(),
        stderr: String::new(),
      })
    });
  }

  /// All recorded invocations
  pub fn calls(&self) -> Vec<CommandSpec> {
    self.calls.borrow().clone()
  }

  /// Recorded invocations whose command line contains `needle`
  pub fn calls_matching(&self, needle: &str) -> Vec<CommandSpec> {
    self
      .calls
      .borrow()
      .iter()
      .filter(|spec| spec.display().contains(needle))
      .cloned()
      .collect()
  }
}

impl ToolRunner for ScriptedRunner {
  fn run(&self, spec: &CommandSpec) -> GateResult<ToolOutput> {
    self.calls.borrow_mut().push(spec.clone());

    let line = spec.display();
    let rules = self.rules.borrow();
    for rule in rules.iter() {
      if line.contains(&rule.needle) {
        return (rule.respond)(spec);
      }
    }

    Ok(ToolOutput {
      code: Some(0),
      stdout: String::new(),
      stderr: String::new(),
    })
  }
}
