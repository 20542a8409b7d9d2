//! Shared test helpers for orchestrator integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use listbuild_lib::{BuildConfig, BuildError, BuildOutput, Orchestrator, RecordingHost};
use tempfile::TempDir;

const FAKE_TOOLCHAIN: &str = include_str!("../fixtures/fake-emcc.sh");

/// Isolated project directory with a fake toolchain installed.
pub struct TestEnv {
  pub temp: TempDir,
  pub tool: PathBuf,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let tool = temp.path().join("fake-emcc");
    std::fs::write(&tool, FAKE_TOOLCHAIN).unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
    Self { temp, tool }
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  pub fn build_dir(&self) -> PathBuf {
    self.root().join("build")
  }

  /// Write a file relative to the project root, backdated so outputs built
  /// from it are strictly newer.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.root().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    backdate(&path);
    path
  }

  /// Configuration using the fake driver for every tool.
  pub fn config(&self) -> BuildConfig {
    let tool = self.tool.to_string_lossy().to_string();
    let mut config = BuildConfig::new(self.build_dir()).unwrap();
    config.cc = tool.clone();
    config.cxx = tool.clone();
    config.ld = tool;
    config
  }

  /// Write `app.list` with `content` and return its path.
  pub fn manifest(&self, content: &str) -> PathBuf {
    self.write_file("app.list", content)
  }

  pub async fn build_with(&self, config: BuildConfig, host: &mut RecordingHost) -> Result<BuildOutput, BuildError> {
    Orchestrator::new(config)
      .build_file(&self.root().join("app.list"), host)
      .await
  }

  pub async fn build(&self, host: &mut RecordingHost) -> Result<BuildOutput, BuildError> {
    self.build_with(self.config(), host).await
  }

  pub fn invocations(&self) -> Vec<String> {
    std::fs::read_to_string(self.root().join("invocations.log"))
      .map(|s| s.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }

  /// Recorded invocations of one mode: `deps`, `compile` or `link`.
  pub fn invocations_of(&self, mode: &str) -> Vec<String> {
    self
      .invocations()
      .into_iter()
      .filter(|line| line.split(' ').next() == Some(mode))
      .collect()
  }
}

/// Move the mtime of `path` ten seconds into the past.
pub fn backdate(path: &Path) {
  let file = std::fs::File::options().write(true).open(path).unwrap();
  file
    .set_modified(SystemTime::now() - Duration::from_secs(10))
    .unwrap();
}
