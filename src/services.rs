pub mod config;
pub mod fetch;
pub mod filter;
pub mod github;
pub mod ordering;

pub use config::{get_config_path, load_config, load_config_from, ConfigError, FileConfig};
pub use fetch::{
    collect_reports, fetch_repository, settle, FailurePolicy, FetchError, FetchOutcome, Settled,
};
pub use filter::{has_fresh, is_fresh, FRESHNESS_WINDOW_DAYS};
pub use github::{get_github_token, ApiError, GitHubApi, OctocrabApi};
pub use ordering::sort_pulls;
