//! Clang-style diagnostic parser.
//!
//! Recognizes headers of the form `<file>:<line>:<col>: <level>: <summary>`.
//! Lines after a header are its detail until the next header or a
//! terminator. Terminators are the driver's own wrapper errors, which always
//! name the program (`emcc: error: ...`, `clang: error: ...`,
//! `shared:ERROR: ...`), and the
//! `N warnings and M errors generated.` footer: they close the open message,
//! which is kept, and are themselves dropped.

use std::sync::LazyLock;

use regex::Regex;

use super::{Diagnostic, DiagnosticLevel};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^(.+?):(\d+):(\d+): (fatal error|[a-z]+): (.*)$").expect("valid diagnostic header pattern")
});

static TERMINATOR: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(concat!(
    r"^(?:",
    r"\d+ (?:warning|error)s?(?: and \d+ (?:warning|error)s?)? generated\.",
    r"|[\w.+-]+: ?(?:error|ERROR): .*",
    r")$"
  ))
  .expect("valid diagnostic terminator pattern")
});

/// Parse raw toolchain output into diagnostics, in stream order.
///
/// Output without any header yields an empty list.
pub fn parse(raw: &str) -> Vec<Diagnostic> {
  let mut parser = Parser::default();
  for line in raw.split('\n') {
    parser.feed(line.strip_suffix('\r').unwrap_or(line));
  }
  parser.finish()
}

struct OpenMessage {
  header: Diagnostic,
  detail: Vec<String>,
}

impl OpenMessage {
  fn close(mut self) -> Diagnostic {
    while self.detail.last().is_some_and(|l| l.trim().is_empty()) {
      self.detail.pop();
    }
    self.header.detail = self.detail.join("\n");
    self.header
  }
}

#[derive(Default)]
struct Parser {
  messages: Vec<Diagnostic>,
  open: Option<OpenMessage>,
}

impl Parser {
  fn feed(&mut self, line: &str) {
    if let Some(header) = parse_header(line) {
      self.close();
      self.open = Some(OpenMessage {
        header,
        detail: Vec::new(),
      });
      return;
    }

    if TERMINATOR.is_match(line) {
      self.close();
      return;
    }

    if let Some(open) = &mut self.open {
      open.detail.push(line.to_string());
    }
  }

  fn close(&mut self) {
    if let Some(open) = self.open.take() {
      self.messages.push(open.close());
    }
  }

  fn finish(mut self) -> Vec<Diagnostic> {
    self.close();
    self.messages
  }
}

fn parse_header(line: &str) -> Option<Diagnostic> {
  let caps = HEADER.captures(line)?;
  Some(Diagnostic {
    file_path: caps[1].to_string(),
    line: caps[2].parse().ok()?,
    column: caps[3].parse().ok()?,
    level: DiagnosticLevel::from(&caps[4]),
    summary: caps[5].to_string(),
    detail: String::new(),
  })
}
