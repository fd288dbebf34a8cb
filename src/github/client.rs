use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::context::RepoRef;
use crate::error::{LabelerError, Result};
use crate::github::{dedup_preserving_order, PullRequestApi};

/// Largest page size the files endpoint accepts
pub const PAGE_SIZE: usize = 100;

const USER_AGENT: &str = concat!("version-labeler/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct PullRequestFile {
    filename: String,
}

#[derive(Debug, Serialize)]
struct AddLabelsRequest<'a> {
    labels: &'a [String],
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// GitHub REST client authenticated with a repository token
pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a client for `base_url` (e.g. `https://api.github.com`)
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(GitHubClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    fn files_url(&self, repo: &RepoRef, pr_number: u64) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}/files",
            self.base_url, repo.owner, repo.repo, pr_number
        )
    }

    fn labels_url(&self, repo: &RepoRef, issue_number: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/labels",
            self.base_url, repo.owner, repo.repo, issue_number
        )
    }
}

/// Turn a non-2xx response into a [LabelerError::Remote] carrying the API message
fn check_status(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    Err(LabelerError::remote(format!(
        "{} failed with status {}: {}",
        action,
        status.as_u16(),
        message
    )))
}

impl PullRequestApi for GitHubClient {
    #[instrument(skip(self, repo), fields(repo = %repo))]
    fn list_changed_files(&self, repo: &RepoRef, pr_number: u64) -> Result<Vec<String>> {
        let url = self.files_url(repo, pr_number);
        let mut files = Vec::new();
        let mut page = 1;

        loop {
            let request = self.http.get(&url).query(&[
                ("per_page", PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ]);
            let response = check_status(
                self.authorized(request).send()?,
                "Listing pull request files",
            )?;
            let batch: Vec<PullRequestFile> = response.json()?;
            let count = batch.len();
            debug!(page, count, "fetched changed files page");

            files.extend(batch.into_iter().map(|f| f.filename));
            if count < PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(dedup_preserving_order(files))
    }

    #[instrument(skip(self, repo), fields(repo = %repo))]
    fn add_labels(&self, repo: &RepoRef, issue_number: u64, labels: &[String]) -> Result<()> {
        if labels.is_empty() {
            return Ok(());
        }

        let request = self
            .http
            .post(self.labels_url(repo, issue_number))
            .json(&AddLabelsRequest { labels });
        check_status(self.authorized(request).send()?, "Adding labels")?;

        info!(count = labels.len(), issue_number, "labels added");
        Ok(())
    }
}
