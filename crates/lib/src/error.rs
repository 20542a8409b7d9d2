//! Error types for planning and building.

use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostic::{Diagnostic, count_errors};

/// Errors in the directive list file.
///
/// Reported before any compilation starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
  #[error("line {line}: multiple pre-injection scripts are not supported")]
  MultiplePreScripts { line: usize },

  #[error("line {line}: multiple post-injection scripts are not supported")]
  MultiplePostScripts { line: usize },

  #[error("line {line}: '{directive}' directive is missing a script path")]
  EmptyScriptPath { line: usize, directive: char },
}

/// Errors in the build options.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("buildDir must be specified")]
  MissingBuildDir,

  #[error("buildDir must be absolute: {0}")]
  RelativeBuildDir(PathBuf),

  #[error("cwd must be absolute: {0}")]
  RelativeCwd(PathBuf),

  #[error("failed to read options file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse options file {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

/// Errors that abort a build.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("invalid list file: {0}")]
  Manifest(#[from] ManifestError),

  /// The toolchain program could not be found.
  #[error("not found '{program}'. Have you installed it?")]
  ToolchainNotFound { program: String },

  /// At least one unit produced an error; linking was not attempted.
  #[error("encountered {} error(s) while compiling", count_errors(.diagnostics))]
  CompileDiagnostics { diagnostics: Vec<Diagnostic> },

  /// The link step produced an error; no artifacts were emitted.
  #[error("encountered {} error(s) while linking", count_errors(.diagnostics))]
  LinkDiagnostics { diagnostics: Vec<Diagnostic> },

  /// A caller broke an internal contract.
  #[error("internal invariant violated: {0}")]
  Invariant(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

impl BuildError {
  /// Diagnostics carried by a compile or link failure.
  pub fn diagnostics(&self) -> &[Diagnostic] {
    match self {
      BuildError::CompileDiagnostics { diagnostics } | BuildError::LinkDiagnostics { diagnostics } => diagnostics,
      _ => &[],
    }
  }
}
