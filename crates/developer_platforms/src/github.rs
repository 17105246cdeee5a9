use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Serialize;
use tracing::{debug, error, info, instrument};

use crate::{
    errors::Error,
    models::{PullRequest, PullRequestFile},
    PullRequestProvider,
};

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;

/// Page size used when listing open pull requests.
const PULL_REQUEST_PAGE_SIZE: u8 = 100;

#[derive(Debug, Serialize)]
struct PageParameters<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    per_page: u8,
    page: u32,
}

/// Creates an `Octocrab` client authenticated with a personal access token.
///
/// # Arguments
///
/// * `token` - The personal access token
/// * `api_url` - Optional base URL of the API, e.g. for GitHub Enterprise. Defaults
///   to `https://api.github.com`.
///
/// # Errors
///
/// Returns `Error::AuthError` if the base URL is invalid or the client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use label_it_developer_platforms::github::{create_token_client, GitHubProvider};
///
/// #[tokio::main]
/// async fn main() -> Result<(), label_it_developer_platforms::errors::Error> {
///     let client = create_token_client("ghp_example", None)?;
///     let provider = GitHubProvider::new(client);
///     Ok(())
/// }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(token: &str, api_url: Option<&str>) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder();
    if let Some(url) = api_url {
        builder = builder.base_uri(url).map_err(|e| {
            Error::AuthError(format!("Invalid API base URL '{}': {}", url, e))
        })?;
    }

    builder
        .personal_token(token.to_string())
        .build()
        .map_err(|e| Error::AuthError(format!("Failed to build the GitHub client: {}", e)))
}

/// Creates an `Octocrab` client that authenticates with HTTP basic auth.
///
/// GitHub accepts a user name together with a personal access token as the password.
///
/// # Errors
///
/// Returns `Error::AuthError` if the base URL is invalid or the client cannot be built.
#[instrument(skip(token))]
pub fn create_basic_auth_client(
    user: &str,
    token: &str,
    api_url: Option<&str>,
) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder();
    if let Some(url) = api_url {
        builder = builder.base_uri(url).map_err(|e| {
            Error::AuthError(format!("Invalid API base URL '{}': {}", url, e))
        })?;
    }

    builder
        .basic_auth(user.to_string(), token.to_string())
        .build()
        .map_err(|e| Error::AuthError(format!("Failed to build the GitHub client: {}", e)))
}

/// Logs an octocrab error and translates it into a platform `Error`.
fn translate_octocrab_error(message: &str, e: octocrab::Error) -> Error {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let err = *source;
            error!(
                error_message = err.message,
                status = err.status_code.as_u16(),
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            );

            let status = err.status_code.as_u16();
            if (status == 403 || status == 429) && err.message.to_lowercase().contains("rate limit")
            {
                Error::RateLimitExceeded
            } else if status == 401 {
                Error::AuthError(format!("{}: {}", message, err.message))
            } else {
                Error::ApiError(format!("{}: {} ({})", message, err.message, status))
            }
        }
        octocrab::Error::Serde { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. The response could not be decoded.",
                message
            );
            Error::InvalidResponse(format!("{}: {}", message, source))
        }
        octocrab::Error::Json { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. The response could not be decoded.",
                message
            );
            Error::InvalidResponse(format!("{}: {}", message, source))
        }
        octocrab::Error::InvalidUtf8 { source, backtrace } => {
            error!(
                error_message = source.to_string(),
                backtrace = backtrace.to_string(),
                "{}. The message wasn't valid UTF-8.",
                message,
            );
            Error::InvalidResponse(format!("{}: {}", message, source))
        }
        _ => {
            error!(error_message = e.to_string(), message);
            Error::ApiError(format!("{}: {}", message, e))
        }
    }
}

/// `PullRequestProvider` backed by the GitHub REST API.
#[derive(Debug)]
pub struct GitHubProvider {
    client: Octocrab,
}

impl GitHubProvider {
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PullRequestProvider for GitHubProvider {
    #[instrument(skip(self))]
    async fn list_open_pull_requests(
        &self,
        repo_owner: &str,
        repo_name: &str,
    ) -> Result<Vec<PullRequest>, Error> {
        let route = format!("/repos/{}/{}/pulls", repo_owner, repo_name);

        let mut pull_requests = Vec::new();
        let mut page = 1u32;
        loop {
            let parameters = PageParameters {
                state: Some("open"),
                per_page: PULL_REQUEST_PAGE_SIZE,
                page,
            };

            let batch: Vec<PullRequest> = self
                .client
                .get(&route, Some(&parameters))
                .await
                .map_err(|e| translate_octocrab_error("Failed to list open pull requests", e))?;

            let count = batch.len();
            debug!(
                repository_owner = repo_owner,
                repository = repo_name,
                page,
                count,
                "Retrieved page of open pull requests"
            );

            pull_requests.extend(batch);
            if count < PULL_REQUEST_PAGE_SIZE as usize {
                break;
            }

            page += 1;
        }

        info!(
            repository_owner = repo_owner,
            repository = repo_name,
            count = pull_requests.len(),
            "Listed open pull requests"
        );

        Ok(pull_requests)
    }

    #[instrument(skip(self))]
    async fn list_pull_request_files(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<PullRequestFile>, Error> {
        let route = format!(
            "/repos/{}/{}/pulls/{}/files",
            repo_owner, repo_name, pr_number
        );
        let parameters = PageParameters {
            state: None,
            per_page,
            page,
        };

        self.client
            .get(&route, Some(&parameters))
            .await
            .map_err(|e| translate_octocrab_error("Failed to list pull request files", e))
    }

    #[instrument(skip(self))]
    async fn add_labels(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        labels: &[String],
    ) -> Result<(), Error> {
        match self
            .client
            .issues(repo_owner, repo_name)
            .add_labels(pr_number, labels)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => match translate_octocrab_error("Failed to add new labels", e) {
                Error::ApiError(details) => Err(Error::FailedToUpdatePullRequest(details)),
                other => Err(other),
            },
        }
    }
}
