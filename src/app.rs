pub mod runner;
pub mod settings;

pub use runner::{check_access, run, RunError, RunSummary};
pub use settings::{CliOverrides, RunOptions, Settings, DEFAULT_CONCURRENCY};
