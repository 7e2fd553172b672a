mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{days_ago, now, raw_pr, FakeApi};
use pr_checker::app::{run, RunError, RunOptions};
use pr_checker::data::DisplayMode;
use pr_checker::services::{FailurePolicy, FetchError};
use pr_checker::RawPullRequest;

fn options(org: &str) -> RunOptions {
    RunOptions {
        org: org.to_string(),
        display_mode: DisplayMode::Plain,
        concurrency: 4,
        failure_policy: FailurePolicy::Abort,
    }
}

async fn run_plain(
    api: Arc<FakeApi>,
    options: &RunOptions,
) -> (Result<pr_checker::RunSummary, RunError>, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let result = run(api, options, now(), &mut out, &mut err).await;
    (
        result,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[tokio::test]
async fn only_repositories_with_fresh_pulls_are_printed() {
    let api = FakeApi::member_of("acme")
        .with_repo(
            "repo-a",
            vec![raw_pr(
                "Fix bug",
                "alice",
                "https://github.com/acme/repo-a/pull/1",
                false,
                days_ago(3),
            )],
        )
        .with_repo(
            "repo-b",
            vec![raw_pr(
                "Old idea",
                "bob",
                "https://github.com/acme/repo-b/pull/9",
                true,
                days_ago(30),
            )],
        );

    let (result, out, err) = run_plain(Arc::new(api), &options("acme")).await;
    let summary = result.unwrap();

    assert_eq!(summary.repositories, 2);
    assert_eq!(summary.printed, 1);
    assert_eq!(
        out,
        "repo-a\n  Ready\t- alice => Fix bug (https://github.com/acme/repo-a/pull/1)\n"
    );
    assert!(err.is_empty());
}

#[tokio::test]
async fn fresh_pulls_print_newest_first_on_every_run() {
    let pulls = vec![
        raw_pr("older", "carol", "https://x/1", false, days_ago(5)),
        raw_pr("newer", "dave", "https://x/2", false, days_ago(1)),
    ];

    let mut outputs = Vec::new();
    for _ in 0..3 {
        let api = FakeApi::member_of("acme").with_repo("api", pulls.clone());
        let (result, out, _) = run_plain(Arc::new(api), &options("acme")).await;
        result.unwrap();
        outputs.push(out);
    }

    let lines: Vec<&str> = outputs[0].lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("newer"));
    assert!(lines[2].contains("older"));
    assert!(outputs.iter().all(|o| o == &outputs[0]));
}

#[tokio::test]
async fn missing_membership_stops_before_any_listing() {
    let api = Arc::new(
        FakeApi::member_of("other-org").with_repo(
            "api",
            vec![raw_pr("x", "a", "https://x/1", false, days_ago(1))],
        ),
    );

    let (result, out, _) = run_plain(Arc::clone(&api), &options("acme")).await;

    assert!(matches!(result, Err(RunError::NoAccess(ref org)) if org == "acme"));
    assert!(out.is_empty());
    assert_eq!(api.repo_calls.load(Ordering::SeqCst), 0);
    assert_eq!(api.pull_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn membership_check_ignores_case() {
    let api = FakeApi::member_of("Acme").with_repo("api", vec![]);
    let (result, _, _) = run_plain(Arc::new(api), &options("acme")).await;
    assert_eq!(result.unwrap().repositories, 1);
}

#[tokio::test]
async fn every_repository_is_collected_before_printing() {
    let mut api = FakeApi::member_of("acme");
    for i in 0..10 {
        let name = format!("repo-{i}");
        api = api
            .with_repo(
                &name,
                vec![raw_pr(&name, "alice", "https://x/1", false, days_ago(1))],
            )
            .with_delay(&name, (10 - i) * 5);
    }
    let api = Arc::new(api);

    let (result, out, _) = run_plain(Arc::clone(&api), &options("acme")).await;
    let summary = result.unwrap();

    assert_eq!(summary.repositories, 10);
    assert_eq!(summary.printed, 10);
    assert_eq!(api.fetched.lock().unwrap().len(), 10);
    for i in 0..10 {
        assert!(out.lines().any(|line| line == format!("repo-{i}")));
    }
}

#[tokio::test]
async fn concurrency_limit_is_respected() {
    let mut api = FakeApi::member_of("acme");
    for i in 0..8 {
        let name = format!("repo-{i}");
        api = api.with_repo(&name, vec![]).with_delay(&name, 20);
    }
    let api = Arc::new(api);
    let options = RunOptions {
        concurrency: 2,
        ..options("acme")
    };

    let (result, _, _) = run_plain(Arc::clone(&api), &options).await;
    result.unwrap();

    assert_eq!(api.pull_calls.load(Ordering::SeqCst), 8);
    assert!(api.max_in_flight.load(Ordering::SeqCst) <= 2);
}

#[tokio::test]
async fn malformed_pull_request_aborts_the_run() {
    let broken = RawPullRequest {
        updated_at: None,
        ..raw_pr("broken", "eve", "https://x/3", false, days_ago(1))
    };
    let api = FakeApi::member_of("acme")
        .with_repo(
            "good",
            vec![raw_pr("fine", "alice", "https://x/1", false, days_ago(1))],
        )
        .with_repo("bad", vec![broken]);

    let (result, out, _) = run_plain(Arc::new(api), &options("acme")).await;

    assert!(matches!(
        result,
        Err(RunError::Fetch(FetchError::Malformed { ref repo, .. })) if repo == "bad"
    ));
    assert!(out.is_empty());
}

#[tokio::test]
async fn api_failure_aborts_without_partial_output() {
    let api = FakeApi::member_of("acme")
        .with_repo(
            "good",
            vec![raw_pr("fine", "alice", "https://x/1", false, days_ago(1))],
        )
        .with_repo("down", vec![])
        .failing("down");

    let (result, out, _) = run_plain(Arc::new(api), &options("acme")).await;

    assert!(matches!(result, Err(RunError::Fetch(FetchError::Api { .. }))));
    assert!(out.is_empty());
}

#[tokio::test]
async fn keep_going_reports_failures_next_to_successes() {
    let api = FakeApi::member_of("acme")
        .with_repo(
            "good",
            vec![raw_pr("fine", "alice", "https://x/1", false, days_ago(1))],
        )
        .with_repo("down", vec![])
        .failing("down");
    let options = RunOptions {
        failure_policy: FailurePolicy::Isolate,
        ..options("acme")
    };

    let (result, out, err) = run_plain(Arc::new(api), &options).await;
    let summary = result.unwrap();

    assert_eq!(summary.printed, 1);
    assert_eq!(summary.failures, 1);
    assert!(out.starts_with("good\n"));
    assert!(err.starts_with("Skipped: failed to list pull requests of down"));
    assert_eq!(err.lines().count(), 1);
}

#[tokio::test]
async fn empty_organization_prints_nothing() {
    let api = FakeApi::member_of("acme");
    let (result, out, err) = run_plain(Arc::new(api), &options("acme")).await;

    assert_eq!(result.unwrap().printed, 0);
    assert!(out.is_empty());
    assert!(err.is_empty());
}
