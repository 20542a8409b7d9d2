//! External program execution.
//!
//! Toolchain failures are data, not faults: [`run`] always returns a
//! [`ProcessOutput`] so callers can parse whatever the program printed before
//! it failed, and tell a missing toolchain apart from a failing one.

use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

/// Exit status a POSIX shell reports for an unknown command.
#[cfg(unix)]
const SHELL_NOT_FOUND: i32 = 127;

/// Exit status `cmd.exe` reports for an unknown command.
#[cfg(windows)]
const SHELL_NOT_FOUND: i32 = 9009;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
  /// Working directory for the child; defaults to the current one.
  pub cwd: Option<PathBuf>,
  /// Launch through the platform shell so wrapper scripts (`emcc.bat`,
  /// shell shims) resolve the way they do interactively.
  pub use_platform_shell: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
  pub exit_ok: bool,
  pub code: Option<i32>,
  pub stdout: Vec<u8>,
  pub stderr: Vec<u8>,
  /// The program itself could not be found.
  pub not_found: bool,
}

impl ProcessOutput {
  pub fn stdout_lossy(&self) -> String {
    String::from_utf8_lossy(&self.stdout).into_owned()
  }

  pub fn stderr_lossy(&self) -> String {
    String::from_utf8_lossy(&self.stderr).into_owned()
  }

  fn spawn_failed(err: io::Error) -> Self {
    ProcessOutput {
      exit_ok: false,
      code: None,
      stdout: Vec::new(),
      stderr: err.to_string().into_bytes(),
      not_found: err.kind() == io::ErrorKind::NotFound,
    }
  }
}

/// Run `program` with `args` and wait for it to exit.
pub async fn run<I, S>(program: &str, args: I, options: &RunOptions) -> ProcessOutput
where
  I: IntoIterator<Item = S>,
  S: AsRef<OsStr>,
{
  let mut command = build_command(program, options.use_platform_shell);
  command
    .args(args)
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());

  if let Some(cwd) = &options.cwd {
    command.current_dir(cwd);
  }

  debug!(program = %program, cwd = ?options.cwd, shell = options.use_platform_shell, "spawning process");

  let output = match command.output().await {
    Ok(output) => output,
    Err(err) => {
      debug!(program = %program, error = %err, "failed to spawn process");
      return ProcessOutput::spawn_failed(err);
    }
  };

  let code = output.status.code();
  let not_found = options.use_platform_shell && code == Some(SHELL_NOT_FOUND);

  if !output.status.success() {
    debug!(
      program = %program,
      code = ?code,
      stderr = %String::from_utf8_lossy(&output.stderr),
      "process exited with failure"
    );
  }

  ProcessOutput {
    exit_ok: output.status.success(),
    code,
    stdout: output.stdout,
    stderr: output.stderr,
    not_found,
  }
}

/// Build the command for `program`, wrapped in the platform shell if asked.
///
/// The Unix shell receives the program and arguments positionally
/// (`sh -c 'exec "$0" "$@"' program args...`), so nothing is re-split.
fn build_command(program: &str, use_platform_shell: bool) -> Command {
  if !use_platform_shell {
    return Command::new(program);
  }

  #[cfg(unix)]
  {
    let mut command = Command::new("/bin/sh");
    command.arg("-c").arg(r#"exec "$0" "$@""#).arg(program);
    command
  }

  #[cfg(windows)]
  {
    let mut command = Command::new("cmd.exe");
    command.args(["/s", "/c"]).arg(program);
    command
  }
}
