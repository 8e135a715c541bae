use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Repository reference as reported by `gh search prs --json repository`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    #[serde(rename = "nameWithOwner")]
    pub name_with_owner: String,
}

/// A pull request awaiting the user's review.
///
/// Produced by the PR source and never persisted as-is; only its
/// [`identity_key`](Self::identity_key) and title reach the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub number: u64,
    pub url: String,
    pub repository: Repository,
    pub title: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_draft: bool,
}

impl PullRequest {
    /// `owner/repo#number`, the key under which the PR is remembered.
    pub fn identity_key(&self) -> String {
        format!("{}#{}", self.repository.name_with_owner, self.number)
    }
}
