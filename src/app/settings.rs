//! Resolution of run settings from the command line and the config file.
//!
//! Every field follows the same rule: a value given on the command line
//! wins, otherwise the config file value is used, otherwise the built-in
//! default. Boolean flags are tri-state on the command line so that an
//! explicit `--be-ugly=false` overrides `"Ugly": true` in the file.

use crate::data::DisplayMode;
use crate::services::{FailurePolicy, FileConfig};

pub const DEFAULT_CONCURRENCY: usize = 8;

/// Values taken from the command line. `None` means the flag was not passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub token: Option<String>,
    pub org_name: Option<String>,
    pub ugly: Option<bool>,
    pub concurrency: Option<usize>,
    pub keep_going: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub token: Option<String>,
    pub org_name: Option<String>,
    pub display_mode: DisplayMode,
    pub concurrency: usize,
    pub failure_policy: FailurePolicy,
}

/// Everything a run needs apart from credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub org: String,
    pub display_mode: DisplayMode,
    pub concurrency: usize,
    pub failure_policy: FailurePolicy,
}

impl Settings {
    pub fn resolve(cli: CliOverrides, file: Option<FileConfig>) -> Self {
        let file = file.unwrap_or_default();

        Self {
            token: non_empty(cli.token).or_else(|| non_empty(file.access_token)),
            org_name: non_empty(cli.org_name).or_else(|| non_empty(file.org_name)),
            display_mode: DisplayMode::from_ugly(cli.ugly.or(file.ugly).unwrap_or(false)),
            concurrency: cli
                .concurrency
                .or(file.concurrency)
                .unwrap_or(DEFAULT_CONCURRENCY)
                .max(1),
            failure_policy: FailurePolicy::from_keep_going(
                cli.keep_going.or(file.keep_going).unwrap_or(false),
            ),
        }
    }

    /// `None` until an organization is known
    pub fn run_options(&self) -> Option<RunOptions> {
        let org = self.org_name.clone()?;
        Some(RunOptions {
            org,
            display_mode: self.display_mode,
            concurrency: self.concurrency,
            failure_policy: self.failure_policy,
        })
    }
}

// An empty string is treated as "not set"
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
