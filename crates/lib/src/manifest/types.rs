use std::path::{Path, PathBuf};

use serde::Serialize;

/// One step of a build plan. All paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum PlanEntry {
  /// Precompiled object or archive, linked as-is.
  Object(PathBuf),
  /// Source compiled to an intermediate object before linking.
  Source(PathBuf),
  /// Script injected before the linked module (`--pre-js`).
  PreScript(PathBuf),
  /// Script injected after the linked module (`--post-js`).
  PostScript(PathBuf),
}

impl PlanEntry {
  pub fn path(&self) -> &Path {
    match self {
      PlanEntry::Object(p) | PlanEntry::Source(p) | PlanEntry::PreScript(p) | PlanEntry::PostScript(p) => p,
    }
  }
}

/// Ordered entries parsed from a list file.
///
/// Holds at most one pre-script and one post-script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
  entries: Vec<PlanEntry>,
}

impl BuildPlan {
  pub(super) fn new(entries: Vec<PlanEntry>) -> Self {
    Self { entries }
  }

  pub fn entries(&self) -> &[PlanEntry] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn sources(&self) -> impl Iterator<Item = &Path> {
    self.entries.iter().filter_map(|e| match e {
      PlanEntry::Source(p) => Some(p.as_path()),
      _ => None,
    })
  }

  pub fn objects(&self) -> impl Iterator<Item = &Path> {
    self.entries.iter().filter_map(|e| match e {
      PlanEntry::Object(p) => Some(p.as_path()),
      _ => None,
    })
  }

  /// Scripts discovered while planning, for the link step.
  pub fn assets(&self) -> DiscoveredAssets {
    let mut assets = DiscoveredAssets::default();
    for entry in &self.entries {
      match entry {
        PlanEntry::PreScript(p) => assets.pre_script = Some(p.clone()),
        PlanEntry::PostScript(p) => assets.post_script = Some(p.clone()),
        _ => {}
      }
    }
    assets
  }
}

/// Build-time discoveries kept apart from the static configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredAssets {
  pub pre_script: Option<PathBuf>,
  pub post_script: Option<PathBuf>,
}
