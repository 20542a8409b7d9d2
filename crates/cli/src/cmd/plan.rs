//! Implementation of the `lbuild plan` command.
//!
//! Parses a list file and prints its entries without running the toolchain.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use listbuild_lib::manifest::{self, PlanEntry};

use crate::output::{print_info, print_json};

fn entry_label(entry: &PlanEntry) -> &'static str {
  match entry {
    PlanEntry::Object(_) => "object",
    PlanEntry::Source(_) => "source",
    PlanEntry::PreScript(_) => "pre-js",
    PlanEntry::PostScript(_) => "post-js",
  }
}

pub fn cmd_plan(list: &Path, json: bool) -> Result<()> {
  let list = dunce::canonicalize(list).with_context(|| format!("List file not found: {}", list.display()))?;
  let text = fs::read_to_string(&list).with_context(|| format!("Failed to read list file: {}", list.display()))?;
  let base_dir = list.parent().unwrap_or(Path::new("."));

  let plan = manifest::plan(&text, base_dir).with_context(|| format!("Failed to plan {}", list.display()))?;

  if json {
    return print_json(&plan);
  }

  for entry in plan.entries() {
    println!("  {:<8} {}", entry_label(entry), entry.path().display());
  }
  println!();
  print_info(&format!(
    "{} source(s), {} object(s)",
    plan.sources().count(),
    plan.objects().count()
  ));

  Ok(())
}
