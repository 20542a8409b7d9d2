//! Interfaces to the tool that drives a build.
//!
//! The orchestrator never decides where artifacts end up or how messages are
//! shown; it reports them to a [`BuildHost`].

use std::path::{Path, PathBuf};

use crate::diagnostic::{Diagnostic, DiagnosticLevel};

pub trait BuildHost {
  /// Register a file whose change must invalidate the build result.
  fn add_dependency(&mut self, path: &Path);

  /// Hand over a produced side artifact under `name`.
  fn emit_file(&mut self, name: &str, content: &[u8]);

  /// Report an error or warning.
  fn emit_diagnostic(&mut self, level: DiagnosticLevel, text: &str);

  /// Plain informational output.
  fn log(&mut self, text: &str);
}

/// Route one diagnostic: errors and warnings to `emit_diagnostic`, the rest
/// to `log`.
pub fn report(host: &mut dyn BuildHost, diagnostic: &Diagnostic) {
  let text = diagnostic.to_string();
  match diagnostic.level {
    DiagnosticLevel::Error | DiagnosticLevel::Warning => host.emit_diagnostic(diagnostic.level.clone(), &text),
    DiagnosticLevel::Note | DiagnosticLevel::Other(_) => host.log(&text),
  }
}

/// Host that keeps everything in memory.
#[derive(Debug, Default)]
pub struct RecordingHost {
  pub dependencies: Vec<PathBuf>,
  pub files: Vec<(String, Vec<u8>)>,
  pub diagnostics: Vec<(DiagnosticLevel, String)>,
  pub logs: Vec<String>,
}

impl RecordingHost {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn has_dependency(&self, path: &Path) -> bool {
    self.dependencies.iter().any(|p| p == path)
  }

  pub fn file(&self, name: &str) -> Option<&[u8]> {
    self.files.iter().find(|(n, _)| n == name).map(|(_, c)| c.as_slice())
  }
}

impl BuildHost for RecordingHost {
  fn add_dependency(&mut self, path: &Path) {
    if !self.has_dependency(path) {
      self.dependencies.push(path.to_path_buf());
    }
  }

  fn emit_file(&mut self, name: &str, content: &[u8]) {
    self.files.push((name.to_string(), content.to_vec()));
  }

  fn emit_diagnostic(&mut self, level: DiagnosticLevel, text: &str) {
    self.diagnostics.push((level, text.to_string()));
  }

  fn log(&mut self, text: &str) {
    self.logs.push(text.to_string());
  }
}
