//! Pull request API abstraction layer
//!
//! The labeling workflow only needs two remote operations: listing the files
//! a pull request touches and adding labels to it. They sit behind the
//! [PullRequestApi] trait so the workflow can run against:
//!
//! - [client::GitHubClient]: the GitHub REST API over `reqwest`
//! - [mock::MockPullRequestApi]: an in-memory fake for tests

pub mod client;
pub mod mock;

pub use client::GitHubClient;
pub use mock::MockPullRequestApi;

use crate::context::RepoRef;
use crate::error::Result;

/// Remote operations on a pull request
///
/// Implementations map transport and API failures to
/// [crate::error::LabelerError] and never retry.
pub trait PullRequestApi: Send + Sync {
    /// List every file changed by the pull request, following pagination.
    ///
    /// The result holds each path once, in the order first returned.
    fn list_changed_files(&self, repo: &RepoRef, pr_number: u64) -> Result<Vec<String>>;

    /// Add labels to an issue or pull request, keeping existing labels
    fn add_labels(&self, repo: &RepoRef, issue_number: u64, labels: &[String]) -> Result<()>;
}

/// Drop repeated paths, keeping first-seen order
pub(crate) fn dedup_preserving_order(paths: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    paths
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .collect()
}
