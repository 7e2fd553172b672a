pub mod models;
pub mod types;

pub use models::{PullRequest, RepositoryReport};
pub use types::{DisplayMode, OrgMembership, PrStatus, RawPullRequest, RecordError};
