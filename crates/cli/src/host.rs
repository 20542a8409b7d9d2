//! Build host backed by an output directory and the terminal.

use std::io;
use std::path::{Path, PathBuf};

use listbuild_lib::BuildHost;
use listbuild_lib::diagnostic::DiagnosticLevel;
use tracing::{debug, info};

use crate::output::print_diagnostic;

/// A file written into the output directory.
#[derive(Debug, Clone, serde::Serialize)]
pub struct WrittenFile {
  pub path: PathBuf,
  pub bytes: u64,
}

/// Writes emitted files into `out_dir` and prints diagnostics to stderr.
///
/// [`BuildHost::emit_file`] cannot fail, so the first write error is kept
/// and surfaced by [`CliHost::finish`].
pub struct CliHost {
  out_dir: PathBuf,
  pub dependencies: Vec<PathBuf>,
  pub written: Vec<WrittenFile>,
  write_error: Option<io::Error>,
}

impl CliHost {
  pub fn new(out_dir: PathBuf) -> Self {
    Self {
      out_dir,
      dependencies: Vec::new(),
      written: Vec::new(),
      write_error: None,
    }
  }

  pub fn out_dir(&self) -> &Path {
    &self.out_dir
  }

  /// Write `content` to `<out_dir>/<name>`.
  pub fn write(&mut self, name: &str, content: &[u8]) -> io::Result<PathBuf> {
    std::fs::create_dir_all(&self.out_dir)?;
    let path = self.out_dir.join(name);
    std::fs::write(&path, content)?;
    debug!(path = ?path, bytes = content.len(), "wrote output file");
    self.written.push(WrittenFile {
      path: path.clone(),
      bytes: content.len() as u64,
    });
    Ok(path)
  }

  /// Return the first error hit while writing emitted files.
  pub fn finish(&mut self) -> io::Result<()> {
    match self.write_error.take() {
      Some(err) => Err(err),
      None => Ok(()),
    }
  }
}

impl BuildHost for CliHost {
  fn add_dependency(&mut self, path: &Path) {
    if !self.dependencies.iter().any(|p| p == path) {
      self.dependencies.push(path.to_path_buf());
    }
  }

  fn emit_file(&mut self, name: &str, content: &[u8]) {
    if self.write_error.is_some() {
      return;
    }
    if let Err(err) = self.write(name, content) {
      self.write_error = Some(err);
    }
  }

  fn emit_diagnostic(&mut self, level: DiagnosticLevel, text: &str) {
    print_diagnostic(&level, text);
  }

  fn log(&mut self, text: &str) {
    info!("{text}");
    print_diagnostic(&DiagnosticLevel::Note, text);
  }
}
