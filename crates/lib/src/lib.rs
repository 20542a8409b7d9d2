//! listbuild-lib: incremental builds of native source lists.
//!
//! This crate compiles a list file of C/C++ sources and precompiled objects
//! into a single linked loader script using an external emscripten-style
//! toolchain:
//! - `manifest`: parses list files into ordered build plans
//! - `unit`: compiles one source, skipping it when its output is up to date
//! - `staleness`: modification-time cache invalidation
//! - `diagnostic`: turns compiler stderr into positioned messages
//! - `build`: orchestrates planning, compiling, linking and artifact emission

pub mod build;
pub mod config;
pub mod consts;
pub mod diagnostic;
pub mod error;
pub mod host;
pub mod manifest;
pub mod process;
pub mod staleness;
pub mod unit;
pub mod util;

pub use build::{BuildOutput, Orchestrator};
pub use config::{BuildConfig, BuildOptions};
pub use error::{BuildError, ConfigError, ManifestError};
pub use host::{BuildHost, RecordingHost};
