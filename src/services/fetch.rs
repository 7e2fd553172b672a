//! Per-repository fetch tasks and the fan-in that gathers their reports.
//!
//! Every repository gets its own task. A semaphore caps how many of them
//! talk to the API at once. Each task pushes exactly one outcome into a
//! channel; the collector drains it until every sender is gone, then joins
//! the tasks so a panicking fetch is reported instead of silently lost.

use futures::channel::mpsc;
use futures::{SinkExt, StreamExt};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::{Id, JoinSet};

use crate::data::{PullRequest, RecordError, RepositoryReport};

use super::github::{ApiError, GitHubApi};

pub type FetchOutcome = Result<RepositoryReport, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid repository name {0:?}")]
    InvalidRepository(String),
    #[error("failed to list pull requests of {repo}: {source}")]
    Api {
        repo: String,
        #[source]
        source: ApiError,
    },
    #[error("malformed pull request in {repo}: {source}")]
    Malformed {
        repo: String,
        #[source]
        source: RecordError,
    },
    #[error("fetch task for {repo} failed: {reason}")]
    TaskFailed { repo: String, reason: String },
}

impl FetchError {
    /// Repository the failure belongs to, when known
    pub fn repository(&self) -> Option<&str> {
        match self {
            FetchError::InvalidRepository(repo)
            | FetchError::Api { repo, .. }
            | FetchError::Malformed { repo, .. }
            | FetchError::TaskFailed { repo, .. } => Some(repo),
        }
    }
}

/// What to do when some repositories could not be fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Fail the whole run, print nothing
    #[default]
    Abort,
    /// Report the failures next to the repositories that did succeed
    Isolate,
}

impl FailurePolicy {
    pub fn from_keep_going(keep_going: bool) -> Self {
        if keep_going {
            FailurePolicy::Isolate
        } else {
            FailurePolicy::Abort
        }
    }
}

/// Reports that made it through, plus the failures an `Isolate` run tolerated
#[derive(Debug, Default)]
pub struct Settled {
    pub reports: Vec<RepositoryReport>,
    pub failures: Vec<FetchError>,
}

/// Fetch and validate every open or draft pull request of one repository.
pub async fn fetch_repository(
    api: &dyn GitHubApi,
    org: &str,
    repo: &str,
) -> Result<RepositoryReport, FetchError> {
    if repo.trim().is_empty() {
        return Err(FetchError::InvalidRepository(repo.to_string()));
    }

    let raw = api
        .list_pull_requests(org, repo)
        .await
        .map_err(|source| FetchError::Api {
            repo: repo.to_string(),
            source,
        })?;

    let pulls = raw
        .into_iter()
        .map(PullRequest::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| FetchError::Malformed {
            repo: repo.to_string(),
            source,
        })?;

    debug!("Fetched {} PRs for {}/{}", pulls.len(), org, repo);
    Ok(RepositoryReport::new(repo, pulls))
}

/// Fetch all repositories concurrently, at most `limit` at a time.
///
/// Returns one outcome per repository, in arrival order.
pub async fn collect_reports(
    api: Arc<dyn GitHubApi>,
    org: &str,
    repos: Vec<String>,
    limit: usize,
) -> Vec<FetchOutcome> {
    let expected = repos.len();
    let permits = Arc::new(Semaphore::new(limit.max(1)));
    let (tx, rx) = mpsc::channel::<FetchOutcome>(0);
    let mut tasks = JoinSet::new();
    let mut names: HashMap<Id, String> = HashMap::with_capacity(expected);

    for repo in repos {
        let name = repo.clone();
        let api = Arc::clone(&api);
        let permits = Arc::clone(&permits);
        let org = org.to_string();
        let mut tx = tx.clone();

        let handle = tasks.spawn(async move {
            let outcome = match permits.acquire_owned().await {
                Ok(_permit) => fetch_repository(api.as_ref(), &org, &repo).await,
                Err(_) => Err(FetchError::TaskFailed {
                    reason: "no fetch slot available".to_string(),
                    repo,
                }),
            };

            if tx.send(outcome).await.is_err() {
                warn!("Report dropped, collector is gone");
            }
        });
        names.insert(handle.id(), name);
    }

    // Channel closes once the last task drops its sender
    drop(tx);
    let mut outcomes: Vec<FetchOutcome> = rx.collect().await;

    while let Some(joined) = tasks.join_next_with_id().await {
        if let Err(err) = joined {
            let repo = names.remove(&err.id()).unwrap_or_default();
            outcomes.push(Err(FetchError::TaskFailed {
                repo,
                reason: err.to_string(),
            }));
        }
    }

    debug!("Collected {} of {} repositories", outcomes.len(), expected);
    outcomes
}

/// Split outcomes according to the failure policy.
///
/// Under `Abort` the first failure is returned and no report survives.
pub fn settle(outcomes: Vec<FetchOutcome>, policy: FailurePolicy) -> Result<Settled, FetchError> {
    let mut settled = Settled::default();

    for outcome in outcomes {
        match outcome {
            Ok(report) => settled.reports.push(report),
            Err(err) if policy == FailurePolicy::Abort => return Err(err),
            Err(err) => {
                debug!("Skipping repository: {}", err);
                settled.failures.push(err);
            }
        }
    }

    Ok(settled)
}
