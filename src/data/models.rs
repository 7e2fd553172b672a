use chrono::{DateTime, Utc};

use super::types::{PrStatus, RawPullRequest, RecordError};

/// A validated, immutable pull request.
#[derive(Debug, Clone, PartialEq)]
pub struct PullRequest {
    title: String,
    author: String,
    link: String,
    status: PrStatus,
    updated_at: DateTime<Utc>,
}

impl PullRequest {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        link: impl Into<String>,
        status: PrStatus,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            link: link.into(),
            status,
            updated_at,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn status(&self) -> PrStatus {
        self.status
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl TryFrom<RawPullRequest> for PullRequest {
    type Error = RecordError;

    fn try_from(raw: RawPullRequest) -> Result<Self, Self::Error> {
        let title = required_text(raw.title, "title")?;
        let author = required_text(raw.author_login, "author")?;
        let link = required_text(raw.html_url, "html_url")?;
        let draft = raw.draft.ok_or(RecordError::MissingField("draft"))?;
        let updated_at = raw
            .updated_at
            .ok_or(RecordError::MissingField("updated_at"))?;

        Ok(Self {
            title,
            author,
            link,
            status: PrStatus::from_draft_flag(draft),
            updated_at,
        })
    }
}

// Blank text counts as absent
fn required_text(value: Option<String>, field: &'static str) -> Result<String, RecordError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(RecordError::MissingField(field)),
    }
}

/// All pull requests fetched for one repository.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryReport {
    pub name: String,
    pub pulls: Vec<PullRequest>,
}

impl RepositoryReport {
    pub fn new(name: impl Into<String>, pulls: Vec<PullRequest>) -> Self {
        Self {
            name: name.into(),
            pulls,
        }
    }
}
