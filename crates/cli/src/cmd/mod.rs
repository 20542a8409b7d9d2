mod build;
mod diagnostics;
mod plan;

pub use build::{BuildArgs, cmd_build};
pub use diagnostics::cmd_diagnostics;
pub use plan::cmd_plan;
