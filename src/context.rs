//! Invocation context - which repository and pull request triggered the run.

use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{LabelerError, Result};

/// `owner/name` of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Parse `owner/repo`
    pub fn parse(full_name: &str) -> Result<Self> {
        match full_name.trim().split_once('/') {
            Some((owner, repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok(RepoRef {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(LabelerError::context(format!(
                "Repository must be given as owner/repo, got '{}'",
                full_name
            ))),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
}

/// Pull request number from an event payload, if the event carries one
pub fn pr_number_from_payload(payload: &str) -> Result<Option<u64>> {
    let event: EventPayload = serde_json::from_str(payload)?;
    Ok(event.pull_request.map(|pr| pr.number))
}

/// Pull request number from the event payload file
pub fn pr_number_from_event_file(path: impl AsRef<Path>) -> Result<Option<u64>> {
    let payload = fs::read_to_string(path)?;
    pr_number_from_payload(&payload)
}

/// Repository and pull request being labeled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub repo: RepoRef,
    pub pr_number: u64,
}

impl RunContext {
    /// Resolve the context from explicit values, falling back to the runner's
    /// `GITHUB_REPOSITORY` and `GITHUB_EVENT_PATH`.
    pub fn resolve(repo: Option<&str>, pr_number: Option<u64>) -> Result<Self> {
        let repo = match repo {
            Some(full_name) => RepoRef::parse(full_name)?,
            None => {
                let full_name = env::var("GITHUB_REPOSITORY").map_err(|_| {
                    LabelerError::context("GITHUB_REPOSITORY is not set and no --repo given")
                })?;
                RepoRef::parse(&full_name)?
            }
        };

        let pr_number = match pr_number {
            Some(n) => Some(n),
            None => match env::var("GITHUB_EVENT_PATH") {
                Ok(path) if Path::new(&path).exists() => pr_number_from_event_file(&path)?,
                _ => None,
            },
        };

        let pr_number = pr_number.ok_or_else(|| {
            LabelerError::context("Could not get pull request number from context, exiting")
        })?;

        Ok(RunContext { repo, pr_number })
    }
}
