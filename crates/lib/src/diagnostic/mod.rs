//! Structured compiler diagnostics.
//!
//! Toolchains report problems as free-form text on stderr. This module turns
//! that text into positioned [`Diagnostic`] values (see [`parse`]) so callers
//! can route errors, warnings and notes separately.

mod parse;

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use parse::parse;

/// Severity of a diagnostic.
///
/// Unknown level words are kept verbatim in `Other`; only `Error` ever fails
/// a build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DiagnosticLevel {
  Error,
  Warning,
  Note,
  Other(String),
}

impl DiagnosticLevel {
  pub fn as_str(&self) -> &str {
    match self {
      DiagnosticLevel::Error => "error",
      DiagnosticLevel::Warning => "warning",
      DiagnosticLevel::Note => "note",
      DiagnosticLevel::Other(word) => word,
    }
  }
}

impl From<&str> for DiagnosticLevel {
  fn from(word: &str) -> Self {
    match word {
      "error" | "fatal error" => DiagnosticLevel::Error,
      "warning" => DiagnosticLevel::Warning,
      "note" => DiagnosticLevel::Note,
      other => DiagnosticLevel::Other(other.to_string()),
    }
  }
}

impl From<String> for DiagnosticLevel {
  fn from(word: String) -> Self {
    DiagnosticLevel::from(word.as_str())
  }
}

impl From<DiagnosticLevel> for String {
  fn from(level: DiagnosticLevel) -> Self {
    level.as_str().to_string()
  }
}

impl fmt::Display for DiagnosticLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A positioned message extracted from toolchain output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
  pub file_path: String,
  pub line: u32,
  pub column: u32,
  pub level: DiagnosticLevel,
  pub summary: String,
  /// Lines following the header, joined with `\n`, verbatim.
  pub detail: String,
}

impl Diagnostic {
  pub fn is_error(&self) -> bool {
    self.level == DiagnosticLevel::Error
  }

  /// Error for a tool that failed without printing a recognizable error.
  ///
  /// Positioned at line 0, column 0 of `file_path`; the raw stderr becomes
  /// the detail.
  pub fn process_failure(file_path: &Path, program: &str, code: Option<i32>, stderr: &str) -> Self {
    let summary = match code {
      Some(code) => format!("'{program}' failed with exit code {code}"),
      None => format!("'{program}' failed"),
    };
    Diagnostic {
      file_path: file_path.display().to_string(),
      line: 0,
      column: 0,
      level: DiagnosticLevel::Error,
      summary,
      detail: stderr.trim_end().to_string(),
    }
  }
}

/// Renders as `path(line,col): level: summary` followed by the detail lines.
impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}({},{}): {}: {}",
      self.file_path, self.line, self.column, self.level, self.summary
    )?;
    if !self.detail.is_empty() {
      write!(f, "\n{}", self.detail)?;
    }
    Ok(())
  }
}

/// Whether any message is error-level.
pub fn contains_error(messages: &[Diagnostic]) -> bool {
  messages.iter().any(Diagnostic::is_error)
}

pub fn count_errors(messages: &[Diagnostic]) -> usize {
  messages.iter().filter(|m| m.is_error()).count()
}
