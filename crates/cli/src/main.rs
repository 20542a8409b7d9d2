mod cmd;
mod host;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::BuildArgs;

/// lbuild - incremental builds of C/C++ source lists into loader scripts
#[derive(Parser)]
#[command(name = "lbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile and link a list file into a loader script
  Build {
    /// Path to the list file
    list: PathBuf,

    #[command(flatten)]
    options: BuildArgs,

    /// Directory the wrapped script and side artifacts are written to
    #[arg(long, value_name = "DIR", default_value = "dist")]
    out_dir: PathBuf,

    /// Print a JSON summary instead of text
    #[arg(long)]
    json: bool,
  },

  /// Show the ordered entries of a list file
  Plan {
    /// Path to the list file
    list: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
  },

  /// Parse raw compiler output into structured messages
  Diagnostics {
    /// File holding compiler output (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match cli.command {
    Commands::Build {
      list,
      options,
      out_dir,
      json,
    } => cmd::cmd_build(&list, options, &out_dir, cli.verbose, json),
    Commands::Plan { list, json } => cmd::cmd_plan(&list, json),
    Commands::Diagnostics { file, json } => cmd::cmd_diagnostics(file.as_deref(), json),
  }
}
