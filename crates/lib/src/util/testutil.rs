//! Test utilities for listbuild-lib.
//!
//! Provides a fake compiler driver script so compile and link paths can be
//! exercised without a real toolchain installed.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

#[cfg(unix)]
const FAKE_TOOLCHAIN: &str = include_str!("../../tests/fixtures/fake-emcc.sh");

/// Install the fake driver into `dir` and return its absolute path.
#[cfg(unix)]
pub fn fake_toolchain(dir: &Path) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let path = dir.join("fake-emcc");
  std::fs::write(&path, FAKE_TOOLCHAIN).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}

/// Write a fixture file with its mtime set well in the past.
///
/// Outputs produced afterwards are then strictly newer even on filesystems
/// with one-second timestamps.
pub fn write_backdated(path: &Path, content: &str) {
  std::fs::write(path, content).unwrap();
  let file = std::fs::File::options().write(true).open(path).unwrap();
  file
    .set_modified(SystemTime::now() - Duration::from_secs(10))
    .unwrap();
}

/// Invocations recorded by the fake driver installed in `dir`.
pub fn invocations(dir: &Path) -> Vec<String> {
  std::fs::read_to_string(dir.join("invocations.log"))
    .map(|s| s.lines().map(str::to_string).collect())
    .unwrap_or_default()
}

/// Number of recorded invocations of the given mode (`deps`, `compile`, `link`).
pub fn count_mode(dir: &Path, mode: &str) -> usize {
  invocations(dir)
    .iter()
    .filter(|line| line.split(' ').next() == Some(mode))
    .count()
}
