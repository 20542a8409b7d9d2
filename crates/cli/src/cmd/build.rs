//! Implementation of the `lbuild build` command.
//!
//! Compiles every source in a list file, links the result and writes the
//! loader-wrapped script plus side artifacts into an output directory.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use listbuild_lib::{BuildOptions, Orchestrator};

use crate::host::CliHost;
use crate::output::{self, format_bytes, format_elapsed, print_error, print_json, print_stat, print_success};

/// Toolchain options. Flags override values from `--config`.
#[derive(Debug, Default, Args)]
pub struct BuildArgs {
  /// JSON options file (camelCase keys, e.g. `buildDir`, `ldFlags`)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Directory for intermediate objects and link output
  #[arg(long, value_name = "DIR")]
  pub build_dir: Option<PathBuf>,

  /// Working directory the toolchain runs in
  #[arg(long, value_name = "DIR")]
  pub cwd: Option<PathBuf>,

  /// C compiler
  #[arg(long, value_name = "PROGRAM")]
  pub cc: Option<String>,

  /// C++ compiler
  #[arg(long, value_name = "PROGRAM")]
  pub cxx: Option<String>,

  /// Linker
  #[arg(long, value_name = "PROGRAM")]
  pub ld: Option<String>,

  /// Flag passed to every compile and link (repeatable)
  #[arg(long = "common-flag", value_name = "FLAG", allow_hyphen_values = true)]
  pub common_flags: Vec<String>,

  /// Flag passed when compiling C (repeatable)
  #[arg(long = "c-flag", value_name = "FLAG", allow_hyphen_values = true)]
  pub c_flags: Vec<String>,

  /// Flag passed when compiling C++ (repeatable)
  #[arg(long = "cxx-flag", value_name = "FLAG", allow_hyphen_values = true)]
  pub cxx_flags: Vec<String>,

  /// Flag passed when linking (repeatable)
  #[arg(long = "ld-flag", value_name = "FLAG", allow_hyphen_values = true)]
  pub ld_flags: Vec<String>,

  /// Launch the toolchain directly instead of through the platform shell
  #[arg(long)]
  pub no_shell: bool,
}

impl BuildArgs {
  /// Options from `--config` overlaid with command-line flags.
  pub fn into_options(self) -> Result<BuildOptions> {
    let base = match &self.config {
      Some(path) => BuildOptions::from_json_file(path)?,
      None => BuildOptions::default(),
    };

    let flags = BuildOptions {
      build_dir: self.build_dir.as_deref().map(absolute).transpose()?,
      cwd: self.cwd.as_deref().map(absolute).transpose()?,
      cc: self.cc,
      cxx: self.cxx,
      ld: self.ld,
      common_flags: non_empty(self.common_flags),
      c_flags: non_empty(self.c_flags),
      cxx_flags: non_empty(self.cxx_flags),
      ld_flags: non_empty(self.ld_flags),
      use_shell: self.no_shell.then_some(false),
    };

    Ok(base.merge(flags))
  }
}

fn absolute(path: &Path) -> Result<PathBuf> {
  let path = std::path::absolute(path).with_context(|| format!("Failed to resolve path: {}", path.display()))?;
  Ok(dunce::simplified(&path).to_path_buf())
}

fn non_empty(flags: Vec<String>) -> Option<Vec<String>> {
  if flags.is_empty() { None } else { Some(flags) }
}

/// Execute the build command.
///
/// Diagnostics are printed as they are reported. On failure the build error
/// is returned after printing so the process exits non-zero.
pub fn cmd_build(list: &Path, args: BuildArgs, out_dir: &Path, verbose: bool, json: bool) -> Result<()> {
  let list = dunce::canonicalize(list).with_context(|| format!("List file not found: {}", list.display()))?;
  let config = args.into_options()?.into_config().context("Invalid build options")?;

  info!(list = ?list, build_dir = ?config.build_dir, "building");

  let mut host = CliHost::new(out_dir.to_path_buf());
  let orchestrator = Orchestrator::new(config);
  let start = Instant::now();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let result = rt.block_on(orchestrator.build_file(&list, &mut host));
  let elapsed = format_elapsed(start.elapsed());

  let output = match result {
    Ok(output) => output,
    Err(e) => {
      print_error(&format!("Build failed after {}: {}", elapsed, e));
      return Err(e.into());
    }
  };

  host
    .finish()
    .with_context(|| format!("Failed to write artifacts to {}", host.out_dir().display()))?;

  let script_name = output
    .script_path
    .file_name()
    .map(|name| name.to_string_lossy().to_string())
    .context("Link output has no file name")?;
  let script_path = host
    .write(&script_name, output.output_script.as_bytes())
    .with_context(|| format!("Failed to write {}", script_name))?;

  if json {
    let json_output = serde_json::json!({
      "script": script_path,
      "files": host.written,
      "unitsCompiled": output.units_compiled,
      "unitsCached": output.units_cached,
      "diagnostics": output.diagnostics,
      "dependencies": host.dependencies,
      "elapsed": elapsed,
    });
    print_json(&json_output)?;
    return Ok(());
  }

  print_success(&format!("Built {} in {}", script_path.display(), elapsed));
  print_stat("Compiled", &output.units_compiled.to_string());
  print_stat("Cached", &output.units_cached.to_string());
  if !output.diagnostics.is_empty() {
    print_stat("Warnings", &output.diagnostics.len().to_string());
  }

  println!();
  println!("Files:");
  for file in &host.written {
    println!(
      "  {} {} ({})",
      output::symbols::ARROW,
      file.path.display(),
      format_bytes(file.bytes)
    );
  }

  if verbose {
    println!();
    println!("Dependencies:");
    for dependency in &host.dependencies {
      println!("  {} {}", output::symbols::INFO, dependency.display());
    }
  }

  Ok(())
}
