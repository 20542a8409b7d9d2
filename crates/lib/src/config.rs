//! Build options and their validated form.
//!
//! [`BuildOptions`] is what callers hand in (a JSON file, CLI flags, or both
//! merged); [`BuildConfig`] is the immutable, validated configuration the
//! orchestrator runs with. Anything discovered while building (pre/post
//! scripts) is carried separately and never written back into the config.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CC, DEFAULT_CXX, DEFAULT_LD};
use crate::error::ConfigError;

/// Options as supplied by the caller. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildOptions {
  /// Directory for intermediate objects and link output. Must be absolute.
  pub build_dir: Option<PathBuf>,
  /// Working directory toolchain paths are made relative to.
  pub cwd: Option<PathBuf>,
  pub cc: Option<String>,
  pub cxx: Option<String>,
  pub ld: Option<String>,
  pub common_flags: Option<Vec<String>>,
  pub c_flags: Option<Vec<String>>,
  pub cxx_flags: Option<Vec<String>>,
  pub ld_flags: Option<Vec<String>>,
  /// Launch the toolchain through the platform shell (default `true`).
  pub use_shell: Option<bool>,
}

impl BuildOptions {
  /// Load options from a JSON file.
  pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Overlay `other` on top of `self`; fields set in `other` win.
  pub fn merge(self, other: BuildOptions) -> Self {
    Self {
      build_dir: other.build_dir.or(self.build_dir),
      cwd: other.cwd.or(self.cwd),
      cc: other.cc.or(self.cc),
      cxx: other.cxx.or(self.cxx),
      ld: other.ld.or(self.ld),
      common_flags: other.common_flags.or(self.common_flags),
      c_flags: other.c_flags.or(self.c_flags),
      cxx_flags: other.cxx_flags.or(self.cxx_flags),
      ld_flags: other.ld_flags.or(self.ld_flags),
      use_shell: other.use_shell.or(self.use_shell),
    }
  }

  /// Validate and fill in defaults.
  ///
  /// `buildDir` and `cwd` must be absolute.
  pub fn into_config(self) -> Result<BuildConfig, ConfigError> {
    let build_dir = self.build_dir.ok_or(ConfigError::MissingBuildDir)?;
    if !build_dir.is_absolute() {
      return Err(ConfigError::RelativeBuildDir(build_dir));
    }
    if let Some(cwd) = self.cwd.as_ref().filter(|cwd| !cwd.is_absolute()) {
      return Err(ConfigError::RelativeCwd(cwd.clone()));
    }

    Ok(BuildConfig {
      build_dir,
      cwd: self.cwd,
      cc: self.cc.unwrap_or_else(|| DEFAULT_CC.to_string()),
      cxx: self.cxx.unwrap_or_else(|| DEFAULT_CXX.to_string()),
      ld: self.ld.unwrap_or_else(|| DEFAULT_LD.to_string()),
      common_flags: self.common_flags.unwrap_or_default(),
      c_flags: self.c_flags.unwrap_or_default(),
      cxx_flags: self.cxx_flags.unwrap_or_default(),
      ld_flags: self.ld_flags.unwrap_or_default(),
      use_shell: self.use_shell.unwrap_or(true),
    })
  }
}

/// Validated build configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  pub build_dir: PathBuf,
  pub cwd: Option<PathBuf>,
  pub cc: String,
  pub cxx: String,
  pub ld: String,
  pub common_flags: Vec<String>,
  pub c_flags: Vec<String>,
  pub cxx_flags: Vec<String>,
  pub ld_flags: Vec<String>,
  pub use_shell: bool,
}

impl BuildConfig {
  /// Configuration with default toolchain and no flags.
  pub fn new(build_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
    BuildOptions {
      build_dir: Some(build_dir.into()),
      ..Default::default()
    }
    .into_config()
  }
}
