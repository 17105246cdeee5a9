use async_trait::async_trait;

pub mod errors;

pub mod github;

pub mod models;
use errors::Error;
use models::{PullRequest, PullRequestFile};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Trait for interacting with developer platforms that provide pull requests (e.g., GitHub).
///
/// Implementations provide the three operations a labeling run needs: listing the
/// open pull requests of a repository, listing one page of the files a pull request
/// changed, and adding labels to a pull request.
///
/// Implementations must be `Send + Sync` because the labeler shares a single provider
/// between concurrently running page fetches and label pushes.
///
/// # Example Implementation
///
/// ```rust,no_run
/// use label_it_developer_platforms::{PullRequestProvider, errors::Error, models::{PullRequest, PullRequestFile}};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct GitHubProvider {
///     // Fields for authentication, etc.
///     token: String,
/// }
///
/// #[async_trait]
/// impl PullRequestProvider for GitHubProvider {
///     async fn list_open_pull_requests(
///         &self,
///         repo_owner: &str,
///         repo_name: &str,
///     ) -> Result<Vec<PullRequest>, Error> {
///         // Implementation to fetch the open PRs from the GitHub API
///         // ...
///         # unimplemented!()
///     }
///
///     // Implement other required methods...
///     # async fn list_pull_request_files(&self, _: &str, _: &str, _: u64, _: u32, _: u8) -> Result<Vec<PullRequestFile>, Error> { unimplemented!() }
///     # async fn add_labels(&self, _: &str, _: &str, _: u64, _: &[String]) -> Result<(), Error> { unimplemented!() }
/// }
/// ```
#[async_trait]
pub trait PullRequestProvider: Send + Sync {
    /// Lists every open pull request in the repository.
    ///
    /// Implementations page through the listing until the platform has no more results.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    ///
    /// # Returns
    ///
    /// A `Result` containing the open pull requests in the order the platform returned them
    async fn list_open_pull_requests(
        &self,
        repo_owner: &str,
        repo_name: &str,
    ) -> Result<Vec<PullRequest>, Error>;

    /// Gets one page of the files changed in a pull request.
    ///
    /// Pages are numbered from 1. A page holding fewer than `per_page` entries is the
    /// last page; callers are responsible for deciding whether to request the next one.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    /// * `page` - The 1-based page to fetch
    /// * `per_page` - The page size to request
    ///
    /// # Returns
    ///
    /// A `Result` containing the files on the requested page
    async fn list_pull_request_files(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<PullRequestFile>, Error>;

    /// Adds labels to a pull request.
    ///
    /// Adding a label the pull request already carries is a no-op on the platform side.
    ///
    /// # Arguments
    ///
    /// * `repo_owner` - The owner of the repository
    /// * `repo_name` - The name of the repository
    /// * `pr_number` - The pull request number
    /// * `labels` - The labels to add
    ///
    /// # Returns
    ///
    /// A `Result` indicating success or failure
    async fn add_labels(
        &self,
        repo_owner: &str,
        repo_name: &str,
        pr_number: u64,
        labels: &[String],
    ) -> Result<(), Error>;
}
