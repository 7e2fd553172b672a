#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use pr_checker::data::OrgMembership;
use pr_checker::services::{ApiError, GitHubApi};
use pr_checker::RawPullRequest;

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    now() - Duration::days(days)
}

pub fn raw_pr(
    title: &str,
    author: &str,
    link: &str,
    draft: bool,
    updated: DateTime<Utc>,
) -> RawPullRequest {
    RawPullRequest {
        title: Some(title.to_string()),
        author_login: Some(author.to_string()),
        html_url: Some(link.to_string()),
        draft: Some(draft),
        updated_at: Some(updated),
    }
}

/// In-memory organization with per-repository latency and failures
#[derive(Default)]
pub struct FakeApi {
    pub memberships: Vec<String>,
    pub repos: Vec<String>,
    pub pulls: HashMap<String, Vec<RawPullRequest>>,
    pub delays_ms: HashMap<String, u64>,
    pub failing: Vec<String>,
    pub repo_calls: AtomicUsize,
    pub pull_calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub fetched: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn member_of(org: &str) -> Self {
        Self {
            memberships: vec![org.to_string()],
            ..Self::default()
        }
    }

    pub fn with_repo(mut self, name: &str, pulls: Vec<RawPullRequest>) -> Self {
        self.repos.push(name.to_string());
        self.pulls.insert(name.to_string(), pulls);
        self
    }

    pub fn with_delay(mut self, name: &str, ms: u64) -> Self {
        self.delays_ms.insert(name.to_string(), ms);
        self
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }
}

#[async_trait]
impl GitHubApi for FakeApi {
    async fn list_org_memberships(&self) -> Result<Vec<OrgMembership>, ApiError> {
        Ok(self
            .memberships
            .iter()
            .map(|login| OrgMembership {
                login: login.clone(),
            })
            .collect())
    }

    async fn list_repositories(&self, _org: &str) -> Result<Vec<String>, ApiError> {
        self.repo_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.repos.clone())
    }

    async fn list_pull_requests(
        &self,
        _org: &str,
        repo: &str,
    ) -> Result<Vec<RawPullRequest>, ApiError> {
        self.pull_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = self.delays_ms.get(repo).copied().unwrap_or(0);
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.fetched.lock().unwrap().push(repo.to_string());

        if self.failing.iter().any(|r| r == repo) {
            return Err(ApiError::Other(format!("{repo} is unavailable")));
        }
        Ok(self.pulls.get(repo).cloned().unwrap_or_default())
    }
}
