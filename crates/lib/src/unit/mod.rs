//! Compilation of a single source file.
//!
//! Each unit compiles to `<buildDir>/<stem>-<hash>.bc`, where the hash is
//! taken from the absolute source path. Before compiling, the compiler is
//! asked for the unit's dependency set and the output is reused when it is
//! newer than all of them.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::BuildConfig;
use crate::consts::{CXX_EXTENSIONS, UNIT_OUTPUT_EXT};
use crate::diagnostic::{self, Diagnostic, contains_error};
use crate::error::BuildError;
use crate::host::BuildHost;
use crate::process::{self, RunOptions};
use crate::staleness::{DependencySet, FileTimes, is_stale, parse_dependency_listing};
use crate::util::hash::ObjectHash;
use crate::util::path::{extension_lower, stem, toolchain_arg};

/// Language family of a source file, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
  C,
  Cxx,
}

impl SourceKind {
  pub fn of(path: &Path) -> Self {
    match extension_lower(path) {
      Some(ext) if CXX_EXTENSIONS.contains(&ext.as_str()) => SourceKind::Cxx,
      _ => SourceKind::C,
    }
  }
}

/// A source file bound to its output location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
  pub source: PathBuf,
  pub output: PathBuf,
  pub kind: SourceKind,
}

impl CompilationUnit {
  /// `source` must be absolute.
  pub fn new(source: &Path, build_dir: &Path) -> Self {
    let hash = ObjectHash::of_path(source);
    let name = format!("{}-{}.{}", stem(source), hash, UNIT_OUTPUT_EXT);
    Self {
      source: source.to_path_buf(),
      output: build_dir.join(name),
      kind: SourceKind::of(source),
    }
  }

  /// Compiler program and flags (`commonFlags` then the per-language flags).
  pub fn toolchain<'c>(&self, config: &'c BuildConfig) -> (&'c str, Vec<String>) {
    let (program, kind_flags) = match self.kind {
      SourceKind::C => (config.cc.as_str(), &config.c_flags),
      SourceKind::Cxx => (config.cxx.as_str(), &config.cxx_flags),
    };
    let flags = config.common_flags.iter().chain(kind_flags).cloned().collect();
    (program, flags)
  }
}

/// What happened to one unit.
#[derive(Debug, Clone)]
pub struct UnitOutcome {
  pub dependencies: DependencySet,
  /// `false` on a cache hit.
  pub compiled: bool,
  pub diagnostics: Vec<Diagnostic>,
}

impl UnitOutcome {
  pub fn failed(&self) -> bool {
    contains_error(&self.diagnostics)
  }
}

/// Compile `unit` unless its output is up to date.
///
/// Every discovered dependency is registered with `host`. A missing compiler
/// aborts with [`BuildError::ToolchainNotFound`]; compile failures are
/// returned as diagnostics.
pub async fn compile_unit<T: FileTimes + ?Sized>(
  unit: &CompilationUnit,
  config: &BuildConfig,
  times: &T,
  host: &mut dyn BuildHost,
) -> Result<UnitOutcome, BuildError> {
  let (program, flags) = unit.toolchain(config);
  let cwd = config.cwd.as_deref();
  let options = RunOptions {
    cwd: config.cwd.clone(),
    use_platform_shell: config.use_shell,
  };
  let source_arg = toolchain_arg(&unit.source, cwd);

  debug!(source = ?unit.source, program = %program, "listing dependencies");

  let mut list_args: Vec<OsString> = flags.iter().map(Into::into).collect();
  list_args.push("-MM".into());
  list_args.push(source_arg.clone());
  let listing = process::run(program, &list_args, &options).await;

  if listing.not_found {
    return Err(BuildError::ToolchainNotFound {
      program: program.to_string(),
    });
  }

  let (dependencies, forced) = if listing.exit_ok {
    let base = match cwd {
      Some(cwd) => cwd.to_path_buf(),
      None => std::env::current_dir()?,
    };
    let mut deps = parse_dependency_listing(&listing.stdout_lossy(), &base);
    deps.insert(unit.source.clone());
    (deps, false)
  } else {
    warn!(
      source = ?unit.source,
      code = ?listing.code,
      "dependency listing failed, compiling unconditionally"
    );
    (DependencySet::from([unit.source.clone()]), true)
  };

  for dep in &dependencies {
    host.add_dependency(dep);
  }

  if !forced && !is_stale(times, &dependencies, &unit.output)? {
    debug!(source = ?unit.source, output = ?unit.output, "unit up to date (cache hit)");
    return Ok(UnitOutcome {
      dependencies,
      compiled: false,
      diagnostics: Vec::new(),
    });
  }

  info!(source = ?unit.source, output = ?unit.output, "compiling unit");

  if let Some(parent) = unit.output.parent() {
    tokio::fs::create_dir_all(parent).await?;
  }

  let mut compile_args: Vec<OsString> = flags.iter().map(Into::into).collect();
  compile_args.push("-c".into());
  compile_args.push("-o".into());
  compile_args.push(toolchain_arg(&unit.output, cwd));
  compile_args.push(source_arg);
  let compiled = process::run(program, &compile_args, &options).await;

  if compiled.not_found {
    return Err(BuildError::ToolchainNotFound {
      program: program.to_string(),
    });
  }

  let stderr = compiled.stderr_lossy();
  let mut diagnostics = diagnostic::parse(&stderr);
  if !compiled.exit_ok && !contains_error(&diagnostics) {
    diagnostics.push(Diagnostic::process_failure(&unit.source, program, compiled.code, &stderr));
  }

  Ok(UnitOutcome {
    dependencies,
    compiled: true,
    diagnostics,
  })
}
