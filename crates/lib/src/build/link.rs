//! The link step.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::BuildConfig;
use crate::consts::MODULE_FLAGS;
use crate::diagnostic::{self, Diagnostic, contains_error};
use crate::error::BuildError;
use crate::manifest::DiscoveredAssets;
use crate::process::{self, RunOptions};
use crate::util::path::toolchain_arg;

/// Linker arguments, in order: injected scripts, `commonFlags`, `ldFlags`,
/// module flags, output, then objects in manifest order.
pub fn link_args(config: &BuildConfig, assets: &DiscoveredAssets, objects: &[PathBuf], output: &Path) -> Vec<OsString> {
  let cwd = config.cwd.as_deref();
  let mut args: Vec<OsString> = Vec::new();

  if let Some(pre) = &assets.pre_script {
    args.push("--pre-js".into());
    args.push(toolchain_arg(pre, cwd));
  }
  if let Some(post) = &assets.post_script {
    args.push("--post-js".into());
    args.push(toolchain_arg(post, cwd));
  }

  args.extend(config.common_flags.iter().map(Into::into));
  args.extend(config.ld_flags.iter().map(Into::into));
  args.extend(MODULE_FLAGS.iter().map(Into::into));
  args.push("-o".into());
  args.push(toolchain_arg(output, cwd));
  args.extend(objects.iter().map(|o| toolchain_arg(o, cwd)));
  args
}

/// Link `objects` into `output` and return the linker's diagnostics.
///
/// A linker that fails without a recognizable error still yields one.
pub async fn link(
  config: &BuildConfig,
  assets: &DiscoveredAssets,
  objects: &[PathBuf],
  output: &Path,
) -> Result<Vec<Diagnostic>, BuildError> {
  info!(output = ?output, objects = objects.len(), linker = %config.ld, "linking");

  if let Some(parent) = output.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }

  let options = RunOptions {
    cwd: config.cwd.clone(),
    use_platform_shell: config.use_shell,
  };
  let args = link_args(config, assets, objects, output);
  let result = process::run(&config.ld, &args, &options).await;

  if result.not_found {
    return Err(BuildError::ToolchainNotFound {
      program: config.ld.clone(),
    });
  }

  let stderr = result.stderr_lossy();
  let mut diagnostics = diagnostic::parse(&stderr);
  if !result.exit_ok && !contains_error(&diagnostics) {
    diagnostics.push(Diagnostic::process_failure(output, &config.ld, result.code, &stderr));
  }
  Ok(diagnostics)
}
