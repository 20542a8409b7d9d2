//! Modification-time based cache invalidation.
//!
//! A compiled unit is reused only when its output is strictly newer than every
//! file it depends on. Ties count as stale: filesystems with coarse clocks
//! would otherwise hide same-second edits.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::error::BuildError;
use crate::util::path::resolve;

/// Absolute paths a unit's output depends on: the source and every header it
/// transitively includes.
pub type DependencySet = BTreeSet<PathBuf>;

/// Source of file modification times.
pub trait FileTimes {
  /// Modification time of `path`, or `None` if it does not exist.
  fn modified(&self, path: &Path) -> Option<SystemTime>;
}

/// Reads modification times from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTimes;

impl FileTimes for FsTimes {
  fn modified(&self, path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
  }
}

/// Modification time of `path`, with missing files at the UNIX epoch.
pub fn modified_time<T: FileTimes + ?Sized>(times: &T, path: &Path) -> SystemTime {
  times.modified(path).unwrap_or(UNIX_EPOCH)
}

/// Latest modification time across `paths`.
pub fn latest_modified_time<'a, T, I>(times: &T, paths: I) -> Result<SystemTime, BuildError>
where
  T: FileTimes + ?Sized,
  I: IntoIterator<Item = &'a Path>,
{
  paths
    .into_iter()
    .map(|p| modified_time(times, p))
    .max()
    .ok_or_else(|| BuildError::Invariant("dependency set must be non-empty".to_string()))
}

/// Whether `output` must be rebuilt from `deps`.
pub fn is_stale<T: FileTimes + ?Sized>(times: &T, deps: &DependencySet, output: &Path) -> Result<bool, BuildError> {
  let latest = latest_modified_time(times, deps.iter().map(PathBuf::as_path))?;
  let output_time = modified_time(times, output);
  let stale = latest >= output_time;
  debug!(output = ?output, stale, "checked staleness");
  Ok(stale)
}

/// Parse make-style output of the compiler's `-MM` mode.
///
/// `main.o: main.c util.h \` continuation lines are joined, the leading
/// `target:` is dropped and the remaining paths are resolved against `cwd`.
pub fn parse_dependency_listing(stdout: &str, cwd: &Path) -> DependencySet {
  let tokens = tokenize_make_rule(stdout);
  let skip = tokens.iter().position(|t| t.ends_with(':')).map_or(1, |i| i + 1);
  tokens
    .into_iter()
    .skip(skip)
    .map(|t| resolve(cwd, Path::new(&t)))
    .collect()
}

/// Split a make rule into whitespace-separated words.
///
/// `\` followed by a newline is a continuation and `\ ` is an escaped space.
/// Any other backslash is literal so Windows paths survive.
fn tokenize_make_rule(text: &str) -> Vec<String> {
  let mut tokens = Vec::new();
  let mut current = String::new();
  let mut chars = text.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '\\' => match chars.peek() {
        Some('\n') | Some('\r') => {
          while matches!(chars.peek(), Some('\n') | Some('\r')) {
            chars.next();
          }
          flush(&mut tokens, &mut current);
        }
        Some(' ') => {
          chars.next();
          current.push(' ');
        }
        _ => current.push('\\'),
      },
      c if c.is_whitespace() => flush(&mut tokens, &mut current),
      c => current.push(c),
    }
  }
  flush(&mut tokens, &mut current);
  tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String) {
  if !current.is_empty() {
    tokens.push(std::mem::take(current));
  }
}
