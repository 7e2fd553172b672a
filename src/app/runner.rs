use chrono::{DateTime, Utc};
use log::{debug, info};
use std::io::{self, Write};
use std::sync::Arc;
use thiserror::Error;

use crate::services::{collect_reports, settle, ApiError, FetchError, GitHubApi};
use crate::view::{render_failures, render_reports};

use super::settings::RunOptions;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("no access to org: {0}")]
    NoAccess(String),
    #[error("failed to list organization memberships: {0}")]
    Memberships(#[source] ApiError),
    #[error("failed to list repositories of {org}: {source}")]
    Repositories {
        org: String,
        #[source]
        source: ApiError,
    },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// What a finished run printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub repositories: usize,
    pub printed: usize,
    pub failures: usize,
}

/// Build and print the pull request report for one organization.
///
/// Nothing is written to `out` until every repository has been fetched.
/// Failures tolerated under `FailurePolicy::Isolate` go to `err`.
pub async fn run<W: Write, E: Write>(
    api: Arc<dyn GitHubApi>,
    options: &RunOptions,
    now: DateTime<Utc>,
    out: &mut W,
    err: &mut E,
) -> Result<RunSummary, RunError> {
    check_access(api.as_ref(), &options.org).await?;

    let repos = api
        .list_repositories(&options.org)
        .await
        .map_err(|source| RunError::Repositories {
            org: options.org.clone(),
            source,
        })?;
    let repositories = repos.len();
    info!(
        "Fetching pull requests of {} repositories in {}",
        repositories, options.org
    );

    let outcomes = collect_reports(api, &options.org, repos, options.concurrency).await;
    let settled = settle(outcomes, options.failure_policy)?;

    let printed = render_reports(out, settled.reports, now, options.display_mode)?;
    out.flush()?;
    render_failures(err, &settled.failures)?;

    Ok(RunSummary {
        repositories,
        printed,
        failures: settled.failures.len(),
    })
}

/// Fail with `NoAccess` unless the token's principal belongs to `org`.
pub async fn check_access(api: &dyn GitHubApi, org: &str) -> Result<(), RunError> {
    let memberships = api
        .list_org_memberships()
        .await
        .map_err(RunError::Memberships)?;
    debug!("Token belongs to {} organizations", memberships.len());

    // Logins are case-insensitive on GitHub
    if memberships
        .iter()
        .any(|membership| membership.login.eq_ignore_ascii_case(org))
    {
        Ok(())
    } else {
        Err(RunError::NoAccess(org.to_string()))
    }
}
