use std::path::Path;

use crate::consts::OBJECT_EXTENSIONS;
use crate::util::path::extension_lower;

/// One classified list-file line.
///
/// Prefixes are tested in a fixed priority order: comment, `^`, `$`, then
/// object extension; anything else is a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
  Comment,
  PreScript(&'a str),
  PostScript(&'a str),
  Object(&'a str),
  Source(&'a str),
}

impl<'a> Directive<'a> {
  /// Classify an already-trimmed line.
  pub fn classify(line: &'a str) -> Self {
    if line.is_empty() || line.starts_with('#') {
      return Directive::Comment;
    }
    if let Some(rest) = line.strip_prefix('^') {
      return Directive::PreScript(rest.trim());
    }
    if let Some(rest) = line.strip_prefix('$') {
      return Directive::PostScript(rest.trim());
    }
    if is_object(line) {
      return Directive::Object(line);
    }
    Directive::Source(line)
  }
}

fn is_object(path: &str) -> bool {
  extension_lower(Path::new(path)).is_some_and(|ext| OBJECT_EXTENSIONS.contains(&ext.as_str()))
}
