//! Implementation of the `lbuild diagnostics` command.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::Stream;

use listbuild_lib::diagnostic::{self, count_errors};

use crate::output::{print_info, print_json, render_diagnostic};

/// Parse compiler output from `file` (or stdin) and print each message.
pub fn cmd_diagnostics(file: Option<&Path>, json: bool) -> Result<()> {
  let raw = match file {
    Some(path) => {
      std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    }
    None => {
      let mut buf = String::new();
      std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
      buf
    }
  };

  let messages = diagnostic::parse(&raw);

  if json {
    return print_json(&messages);
  }

  for message in &messages {
    println!("{}", render_diagnostic(&message.level, &message.to_string(), Stream::Stdout));
  }
  print_info(&format!(
    "{} message(s), {} error(s)",
    messages.len(),
    count_errors(&messages)
  ));

  Ok(())
}
