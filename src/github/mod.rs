use crate::error::AnnotateError;
use crate::report::Annotate;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Pull-request coordinates and API token, resolved from the environment
/// GitHub Actions provides. This is the only place the process
/// environment is read; the reporting core receives the result as an
/// already-constructed annotator or nothing at all.
#[derive(Debug, Clone)]
pub struct CommentTarget {
    pub owner: String,
    pub repo: String,
    pub issue_number: u64,
    pub token: String,
}

#[derive(Deserialize)]
struct EventPayload {
    #[serde(default)]
    pull_request: Option<PullRequestRef>,

    // Some event types carry the number at the top level instead
    #[serde(default)]
    number: Option<u64>,
}

#[derive(Deserialize)]
struct PullRequestRef {
    #[serde(default)]
    number: Option<u64>,
}

impl CommentTarget {
    /// Resolve the comment target from GITHUB_TOKEN, GITHUB_REPOSITORY
    /// and the GITHUB_EVENT_PATH payload file. Any missing piece logs a
    /// warning and returns `None`; the caller then reports in dry-run
    /// mode instead of failing the run.
    pub fn from_env() -> Option<Self> {
        let token = match std::env::var("GITHUB_TOKEN") {
            Ok(token) if !token.is_empty() => token,
            _ => {
                warn!("GITHUB_TOKEN not set. Running in dry-run mode without PR comments.");
                return None;
            }
        };

        let repository = std::env::var("GITHUB_REPOSITORY").unwrap_or_default();
        let Some((owner, repo)) = split_repository(&repository) else {
            warn!("Missing repository or pull request context. Comments will not be posted.");
            return None;
        };

        let issue_number = std::env::var("GITHUB_EVENT_PATH")
            .ok()
            .and_then(|path| pull_number_from_event(Path::new(&path)));
        let Some(issue_number) = issue_number else {
            warn!("Missing repository or pull request context. Comments will not be posted.");
            return None;
        };

        debug!(
            "Resolved comment target {}/{}#{}",
            owner, repo, issue_number
        );

        Some(Self {
            owner,
            repo,
            issue_number,
            token,
        })
    }
}

fn split_repository(repository: &str) -> Option<(String, String)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
            Some((owner.to_string(), repo.to_string()))
        }
        _ => None,
    }
}

fn pull_number_from_event(path: &Path) -> Option<u64> {
    let raw = std::fs::read_to_string(path).ok()?;
    let event: EventPayload = serde_json::from_str(&raw).ok()?;
    event
        .pull_request
        .and_then(|pr| pr.number)
        .or(event.number)
}

/// Posts review comments through the GitHub issues REST API.
pub struct GithubAnnotator {
    client: reqwest::Client,
    target: CommentTarget,
}

impl GithubAnnotator {
    pub fn new(target: CommentTarget) -> Self {
        Self {
            client: reqwest::Client::new(),
            target,
        }
    }
}

#[async_trait]
impl Annotate for GithubAnnotator {
    async fn annotate(&self, body: &str) -> Result<(), AnnotateError> {
        let url = format!(
            "https://api.github.com/repos/{}/{}/issues/{}/comments",
            self.target.owner, self.target.repo, self.target.issue_number
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.target.token)
            .header(reqwest::header::USER_AGENT, "policygate")
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnnotateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
