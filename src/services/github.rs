use async_trait::async_trait;
use log::debug;
use octocrab::{params, Octocrab};
use std::process::Command;
use thiserror::Error;

use crate::data::{OrgMembership, RawPullRequest};

// Single page, no pagination
const PER_PAGE: u8 = 100;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("GitHub request failed: {0}")]
    Request(#[from] octocrab::Error),
    #[error("{0}")]
    Other(String),
}

/// The three calls the report needs from the hosting API.
///
/// Implementations must be `Send + Sync` so one client can be shared by
/// every repository fetch task.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Organizations the token's principal is a member of
    async fn list_org_memberships(&self) -> Result<Vec<OrgMembership>, ApiError>;

    /// Repository names in an organization
    async fn list_repositories(&self, org: &str) -> Result<Vec<String>, ApiError>;

    /// Open and draft pull requests of one repository
    async fn list_pull_requests(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<RawPullRequest>, ApiError>;
}

/// Read the token of an existing `gh` CLI login.
pub fn get_github_token() -> Option<String> {
    let output = Command::new("gh").args(["auth", "token"]).output().ok()?;

    if !output.status.success() {
        return None;
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!token.is_empty()).then_some(token)
}

/// `GitHubApi` backed by octocrab and a personal access token
#[derive(Debug, Clone)]
pub struct OctocrabApi {
    octocrab: Octocrab,
}

impl OctocrabApi {
    pub fn new(token: String) -> Result<Self, ApiError> {
        let octocrab = Octocrab::builder().personal_token(token).build()?;
        Ok(Self { octocrab })
    }
}

#[async_trait]
impl GitHubApi for OctocrabApi {
    async fn list_org_memberships(&self) -> Result<Vec<OrgMembership>, ApiError> {
        let page = self
            .octocrab
            .current()
            .list_org_memberships_for_authenticated_user()
            .per_page(PER_PAGE)
            .send()
            .await?;

        Ok(page
            .items
            .into_iter()
            .map(|membership| OrgMembership {
                login: membership.organization.login,
            })
            .collect())
    }

    async fn list_repositories(&self, org: &str) -> Result<Vec<String>, ApiError> {
        debug!("Listing repositories of {}", org);

        let page = self
            .octocrab
            .orgs(org)
            .list_repos()
            .per_page(PER_PAGE)
            .send()
            .await?;

        Ok(page.items.into_iter().map(|repo| repo.name).collect())
    }

    async fn list_pull_requests(
        &self,
        org: &str,
        repo: &str,
    ) -> Result<Vec<RawPullRequest>, ApiError> {
        // State::Open includes drafts
        let page = self
            .octocrab
            .pulls(org, repo)
            .list()
            .state(params::State::Open)
            .per_page(PER_PAGE)
            .send()
            .await?;

        Ok(page.items.into_iter().map(convert_pull_request).collect())
    }
}

/// Convert octocrab PullRequest to our unvalidated record
fn convert_pull_request(pr: octocrab::models::pulls::PullRequest) -> RawPullRequest {
    RawPullRequest {
        title: pr.title,
        author_login: pr.user.map(|user| user.login),
        html_url: pr.html_url.map(|url| url.to_string()),
        draft: pr.draft,
        updated_at: pr.updated_at,
    }
}
