//! Build orchestration.
//!
//! A build turns one list file into one linked loader script:
//!
//! 1. The list file is parsed into a [`BuildPlan`](crate::manifest::BuildPlan).
//! 2. Every source is compiled in list order; units whose output is newer
//!    than all their dependencies are reused.
//! 3. If no unit reported an error, all objects are linked in list order.
//! 4. The link output is wrapped into a loader and optional side artifacts
//!    present in the build directory are emitted.
//!
//! Units are compiled one at a time. Diagnostics from all units are collected
//! before the build fails, so one run reports every broken file.
//!
//! # Submodules
//!
//! - [`link`] - Linker invocation
//! - [`loader`] - Loader script template

pub mod link;
pub mod loader;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::BuildConfig;
use crate::consts::SIDE_ARTIFACT_SUFFIXES;
use crate::diagnostic::{Diagnostic, contains_error};
use crate::error::BuildError;
use crate::host::{BuildHost, report};
use crate::manifest::{self, PlanEntry};
use crate::staleness::{FileTimes, FsTimes};
use crate::unit::{CompilationUnit, compile_unit};
use crate::util::path::stem;

pub use loader::wrap_loader_script;

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildOutput {
  /// Loader-wrapped script text.
  pub output_script: String,
  /// Raw link output in the build directory.
  pub script_path: PathBuf,
  /// Optional side artifacts that were present and emitted.
  pub emitted_artifacts: Vec<PathBuf>,
  /// Non-error diagnostics (warnings, notes) from every step.
  pub diagnostics: Vec<Diagnostic>,
  pub units_compiled: usize,
  pub units_cached: usize,
}

/// Drives planning, compilation and linking for one configuration.
pub struct Orchestrator<T = FsTimes> {
  config: BuildConfig,
  times: T,
}

impl Orchestrator<FsTimes> {
  pub fn new(config: BuildConfig) -> Self {
    Self { config, times: FsTimes }
  }
}

impl<T: FileTimes> Orchestrator<T> {
  /// Use a custom source of modification times.
  pub fn with_times(config: BuildConfig, times: T) -> Self {
    Self { config, times }
  }

  /// Read the list file at `manifest_path` and build it.
  pub async fn build_file(&self, manifest_path: &Path, host: &mut dyn BuildHost) -> Result<BuildOutput, BuildError> {
    let text = tokio::fs::read_to_string(manifest_path).await?;
    self.build(manifest_path, &text, host).await
  }

  /// Build `manifest_text`, read from `manifest_path`.
  ///
  /// Directive paths resolve against the list file's directory and the
  /// output is named after its stem.
  pub async fn build(
    &self,
    manifest_path: &Path,
    manifest_text: &str,
    host: &mut dyn BuildHost,
  ) -> Result<BuildOutput, BuildError> {
    let manifest_path = std::path::absolute(manifest_path)?;
    let base_dir = manifest_path.parent().unwrap_or(Path::new("/"));

    info!(manifest = ?manifest_path, build_dir = ?self.config.build_dir, "starting build");
    host.add_dependency(&manifest_path);

    let plan = manifest::plan(manifest_text, base_dir)?;
    let assets = plan.assets();
    for script in assets.pre_script.iter().chain(&assets.post_script) {
      host.add_dependency(script);
    }

    debug!(entries = plan.len(), "planned build");

    let mut objects = Vec::new();
    let mut diagnostics = Vec::new();
    let mut failed = false;
    let mut units_compiled = 0;
    let mut units_cached = 0;

    for entry in plan.entries() {
      match entry {
        PlanEntry::Object(path) => {
          host.add_dependency(path);
          objects.push(path.clone());
        }
        PlanEntry::Source(path) => {
          let unit = CompilationUnit::new(path, &self.config.build_dir);
          let outcome = compile_unit(&unit, &self.config, &self.times, host).await?;

          for diagnostic in &outcome.diagnostics {
            report(host, diagnostic);
          }
          failed |= outcome.failed();
          if outcome.compiled {
            units_compiled += 1;
          } else {
            units_cached += 1;
          }

          diagnostics.extend(outcome.diagnostics);
          objects.push(unit.output);
        }
        PlanEntry::PreScript(_) | PlanEntry::PostScript(_) => {}
      }
    }

    info!(compiled = units_compiled, cached = units_cached, "compiled units");

    if failed {
      return Err(BuildError::CompileDiagnostics { diagnostics });
    }

    let stem = stem(&manifest_path);
    let script_path = self.config.build_dir.join(format!("{stem}.js"));
    let link_diagnostics = link::link(&self.config, &assets, &objects, &script_path).await?;
    for diagnostic in &link_diagnostics {
      report(host, diagnostic);
    }
    diagnostics.extend(link_diagnostics);

    if contains_error(&diagnostics) {
      return Err(BuildError::LinkDiagnostics { diagnostics });
    }

    let content = tokio::fs::read_to_string(&script_path).await?;
    let emitted_artifacts = emit_side_artifacts(&self.config.build_dir, &stem, host).await?;

    info!(output = ?script_path, artifacts = emitted_artifacts.len(), "build complete");

    Ok(BuildOutput {
      output_script: wrap_loader_script(&content),
      script_path,
      emitted_artifacts,
      diagnostics,
      units_compiled,
      units_cached,
    })
  }
}

/// Emit every `<stem><suffix>` side artifact that exists in `build_dir`.
///
/// Which files a linker writes depends on its version and flags, so each
/// one is checked rather than assumed.
async fn emit_side_artifacts(build_dir: &Path, stem: &str, host: &mut dyn BuildHost) -> Result<Vec<PathBuf>, BuildError> {
  let mut emitted = Vec::new();
  for suffix in SIDE_ARTIFACT_SUFFIXES {
    let name = format!("{stem}{suffix}");
    let path = build_dir.join(&name);
    if !tokio::fs::try_exists(&path).await? {
      continue;
    }
    let content = tokio::fs::read(&path).await?;
    debug!(artifact = %name, bytes = content.len(), "emitting artifact");
    host.emit_file(&name, &content);
    emitted.push(path);
  }
  Ok(emitted)
}
