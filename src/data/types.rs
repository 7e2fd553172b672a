use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::icons;

/// Review state of a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrStatus {
    Draft,
    Open,
}

impl PrStatus {
    pub fn from_draft_flag(draft: bool) -> Self {
        if draft {
            PrStatus::Draft
        } else {
            PrStatus::Open
        }
    }

    /// Label shown in the report. Open pull requests read as "Ready".
    pub fn label(self) -> &'static str {
        match self {
            PrStatus::Draft => icons::STATUS_DRAFT,
            PrStatus::Open => icons::STATUS_READY,
        }
    }
}

/// How the report is written to the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// ANSI colors and clickable OSC 8 links
    #[default]
    Styled,
    /// Tab separated text, no escape sequences
    Plain,
}

impl DisplayMode {
    pub fn from_ugly(ugly: bool) -> Self {
        if ugly {
            DisplayMode::Plain
        } else {
            DisplayMode::Styled
        }
    }
}

/// Pull request as handed over by the hosting API, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPullRequest {
    pub title: Option<String>,
    pub author_login: Option<String>,
    pub html_url: Option<String>,
    pub draft: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One entry of the token owner's organization memberships
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgMembership {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("pull request is missing required field `{0}`")]
    MissingField(&'static str),
}
