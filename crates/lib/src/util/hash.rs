//! Output naming hashes.

use std::fmt;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::consts::OBJ_HASH_PREFIX_LEN;

/// A truncated SHA-256 identifying one logical compilation unit.
///
/// Derived from the unit's absolute source path only, never from file
/// contents: rebuilding a source reuses its output location and two sources
/// with the same file name in different directories get different ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectHash(pub String);

impl ObjectHash {
  pub fn of_path(path: &Path) -> Self {
    let mut hex = sha256_hex(path.to_string_lossy().as_bytes());
    hex.truncate(OBJ_HASH_PREFIX_LEN);
    ObjectHash(hex)
  }
}

impl fmt::Display for ObjectHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
  format!("{:x}", Sha256::digest(data))
}
