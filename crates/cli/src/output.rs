//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages, diagnostics and human-readable sizes.

use std::time::Duration;

use anyhow::Context;
use listbuild_lib::diagnostic::DiagnosticLevel;
use owo_colors::{OwoColorize, Stream};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

pub fn format_bytes(bytes: u64) -> String {
  const KB: u64 = 1024;
  const MB: u64 = KB * 1024;
  const GB: u64 = MB * 1024;

  if bytes >= GB {
    format!("{:.1} GB", bytes as f64 / GB as f64)
  } else if bytes >= MB {
    format!("{:.1} MB", bytes as f64 / MB as f64)
  } else if bytes >= KB {
    format!("{:.1} KB", bytes as f64 / KB as f64)
  } else {
    format!("{} B", bytes)
  }
}

/// Elapsed time rounded to milliseconds, e.g. `1s 250ms`.
pub fn format_elapsed(elapsed: Duration) -> String {
  let millis = Duration::from_millis(elapsed.as_millis() as u64);
  humantime::format_duration(millis).to_string()
}

/// Render a `path(line,col): level: summary` block with a colored header.
///
/// Detail lines after the header are left uncolored.
pub fn render_diagnostic(level: &DiagnosticLevel, text: &str, stream: Stream) -> String {
  let (header, detail) = match text.split_once('\n') {
    Some((header, detail)) => (header, Some(detail)),
    None => (text, None),
  };

  let styled = match level {
    DiagnosticLevel::Error => format!(
      "{} {}",
      symbols::ERROR.if_supports_color(stream, |s| s.red()),
      header.if_supports_color(stream, |s| s.red())
    ),
    DiagnosticLevel::Warning => format!(
      "{} {}",
      symbols::WARNING.if_supports_color(stream, |s| s.yellow()),
      header.if_supports_color(stream, |s| s.yellow())
    ),
    DiagnosticLevel::Note | DiagnosticLevel::Other(_) => format!(
      "{} {}",
      symbols::INFO.if_supports_color(stream, |s| s.blue()),
      header.if_supports_color(stream, |s| s.dimmed())
    ),
  };

  match detail {
    Some(detail) => format!("{styled}\n{detail}"),
    None => styled,
  }
}

pub fn print_diagnostic(level: &DiagnosticLevel, text: &str) {
  eprintln!("{}", render_diagnostic(level, text, Stream::Stderr));
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}
