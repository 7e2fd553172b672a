pub mod app;
pub mod data;
pub mod icons;
pub mod services;
pub mod view;

pub use app::{run, CliOverrides, RunError, RunOptions, RunSummary, Settings};
pub use data::{DisplayMode, PrStatus, PullRequest, RawPullRequest, RepositoryReport};
pub use services::{get_config_path, GitHubApi, OctocrabApi};
