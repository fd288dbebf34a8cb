use std::sync::Mutex;

use crate::context::RepoRef;
use crate::error::{LabelerError, Result};
use crate::github::{dedup_preserving_order, PullRequestApi};

/// A label write captured by [MockPullRequestApi]
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedLabels {
    pub repo: RepoRef,
    pub issue_number: u64,
    pub labels: Vec<String>,
}

/// In-memory pull request API for testing without network access
pub struct MockPullRequestApi {
    changed_files: Vec<String>,
    fail_listing: Option<String>,
    fail_labeling: Option<String>,
    list_calls: Mutex<usize>,
    applied: Mutex<Vec<AppliedLabels>>,
}

impl MockPullRequestApi {
    /// Create a mock whose pull request changes no files
    pub fn new() -> Self {
        MockPullRequestApi {
            changed_files: Vec::new(),
            fail_listing: None,
            fail_labeling: None,
            list_calls: Mutex::new(0),
            applied: Mutex::new(Vec::new()),
        }
    }

    /// Set the files reported as changed
    pub fn with_changed_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changed_files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Make listing changed files fail with a remote error
    pub fn failing_listing(mut self, message: impl Into<String>) -> Self {
        self.fail_listing = Some(message.into());
        self
    }

    /// Make adding labels fail with a remote error
    pub fn failing_labeling(mut self, message: impl Into<String>) -> Self {
        self.fail_labeling = Some(message.into());
        self
    }

    /// How many times changed files were listed
    pub fn list_calls(&self) -> usize {
        self.list_calls.lock().map(|n| *n).unwrap_or_default()
    }

    /// Every successful label write, in order
    pub fn applied(&self) -> Vec<AppliedLabels> {
        self.applied
            .lock()
            .map(|a| a.clone())
            .unwrap_or_default()
    }
}

impl Default for MockPullRequestApi {
    fn default() -> Self {
        Self::new()
    }
}

impl PullRequestApi for MockPullRequestApi {
    fn list_changed_files(&self, _repo: &RepoRef, _pr_number: u64) -> Result<Vec<String>> {
        if let Ok(mut calls) = self.list_calls.lock() {
            *calls += 1;
        }
        if let Some(message) = &self.fail_listing {
            return Err(LabelerError::remote(message.clone()));
        }
        Ok(dedup_preserving_order(self.changed_files.clone()))
    }

    fn add_labels(&self, repo: &RepoRef, issue_number: u64, labels: &[String]) -> Result<()> {
        if let Some(message) = &self.fail_labeling {
            return Err(LabelerError::remote(message.clone()));
        }
        if let Ok(mut applied) = self.applied.lock() {
            applied.push(AppliedLabels {
                repo: repo.clone(),
                issue_number,
                labels: labels.to_vec(),
            });
        }
        Ok(())
    }
}
