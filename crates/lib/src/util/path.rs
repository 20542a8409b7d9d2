//! Lexical path helpers.
//!
//! Directive paths and toolchain arguments are resolved without touching the
//! filesystem: inputs may not exist yet when the plan is built.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `base` and normalize `.` and `..` components.
///
/// Absolute `path`s are normalized as-is.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
  normalize(&base.join(path))
}

/// Remove `.` components and fold `..` into their parent.
pub fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match out.components().next_back() {
        Some(Component::Normal(_)) => {
          out.pop();
        }
        // `..` at the root stays at the root
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
        _ => out.push(".."),
      },
      other => out.push(other.as_os_str()),
    }
  }
  out
}

/// Express `path` relative to `base`.
///
/// Both paths are expected to be absolute. When they share no common prefix
/// (e.g. different drives on Windows) `path` is returned unchanged.
pub fn relative_to(path: &Path, base: &Path) -> PathBuf {
  let path = normalize(path);
  let base = normalize(base);

  let mut path_iter = path.components().peekable();
  let mut base_iter = base.components().peekable();

  let mut shared = 0;
  while let (Some(p), Some(b)) = (path_iter.peek(), base_iter.peek()) {
    if p != b {
      break;
    }
    path_iter.next();
    base_iter.next();
    shared += 1;
  }

  if shared == 0 {
    return path;
  }

  let mut rel = PathBuf::new();
  for _ in base_iter {
    rel.push("..");
  }
  for component in path_iter {
    rel.push(component.as_os_str());
  }
  if rel.as_os_str().is_empty() {
    rel.push(".");
  }
  rel
}

/// Render a path as a toolchain argument, relative to `cwd` when one is set.
pub fn toolchain_arg(path: &Path, cwd: Option<&Path>) -> OsString {
  match cwd {
    Some(cwd) => relative_to(path, cwd).into_os_string(),
    None => path.as_os_str().to_os_string(),
  }
}

/// Lower-cased extension of `path`, if any.
pub fn extension_lower(path: &Path) -> Option<String> {
  path.extension().map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

/// File name of `path` without its final extension.
pub fn stem(path: &Path) -> String {
  path
    .file_stem()
    .map(|s| s.to_string_lossy().to_string())
    .unwrap_or_default()
}
