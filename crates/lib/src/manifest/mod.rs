//! Directive list files and the build plans they describe.
//!
//! A list file is line oriented:
//!
//! ```text
//! # comment
//! ^js/pre.js          pre-injection script (at most one)
//! $js/post.js         post-injection script (at most one)
//! lib/libz.a          precompiled object or archive, linked as-is
//! src/main.cpp        source compiled then linked
//! ```
//!
//! Paths are relative to the directory holding the list file. Object and
//! source entries keep their order, which is the link order.

mod directive;
mod types;

pub use directive::Directive;
pub use types::*;

use std::path::Path;

use crate::error::ManifestError;
use crate::util::path::resolve;

/// Parse list-file text into a [`BuildPlan`], resolving paths against `base_dir`.
pub fn plan(manifest_text: &str, base_dir: &Path) -> Result<BuildPlan, ManifestError> {
  let mut entries = Vec::new();
  let mut has_pre = false;
  let mut has_post = false;

  for (idx, raw) in split_lines(manifest_text).enumerate() {
    let line = idx + 1;
    match Directive::classify(raw.trim()) {
      Directive::Comment => {}
      Directive::PreScript(path) => {
        if has_pre {
          return Err(ManifestError::MultiplePreScripts { line });
        }
        if path.is_empty() {
          return Err(ManifestError::EmptyScriptPath { line, directive: '^' });
        }
        has_pre = true;
        entries.push(PlanEntry::PreScript(resolve(base_dir, Path::new(path))));
      }
      Directive::PostScript(path) => {
        if has_post {
          return Err(ManifestError::MultiplePostScripts { line });
        }
        if path.is_empty() {
          return Err(ManifestError::EmptyScriptPath { line, directive: '$' });
        }
        has_post = true;
        entries.push(PlanEntry::PostScript(resolve(base_dir, Path::new(path))));
      }
      Directive::Object(path) => entries.push(PlanEntry::Object(resolve(base_dir, Path::new(path)))),
      Directive::Source(path) => entries.push(PlanEntry::Source(resolve(base_dir, Path::new(path)))),
    }
  }

  Ok(BuildPlan::new(entries))
}

/// Split on `\r\n`, `\r` or `\n`.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
  text.split("\r\n").flat_map(|chunk| chunk.split(['\r', '\n']))
}
