use chrono::{DateTime, Duration, Utc};

use crate::data::PullRequest;

/// How far back an update still counts as recent.
pub const FRESHNESS_WINDOW_DAYS: i64 = 14;

/// A pull request is fresh when it was updated strictly after `now - 14 days`.
pub fn is_fresh(pr: &PullRequest, now: DateTime<Utc>) -> bool {
    pr.updated_at() > now - Duration::days(FRESHNESS_WINDOW_DAYS)
}

pub fn has_fresh(pulls: &[PullRequest], now: DateTime<Utc>) -> bool {
    pulls.iter().any(|pr| is_fresh(pr, now))
}
