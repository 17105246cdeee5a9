//! # Changed Files
//!
//! Collects the names of the files a pull request changes. Pages are requested
//! concurrently: every full page schedules the next one, up to [`MAX_PAGES`].

use label_it_developer_platforms::errors::Error as PlatformError;
use label_it_developer_platforms::models::PullRequestFile;
use label_it_developer_platforms::PullRequestProvider;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

use crate::errors::LabelItError;

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;

/// Number of files requested per page.
pub const PAGE_SIZE: u8 = 100;

/// The platform returns no more than this many pages of changed files.
pub const MAX_PAGES: u32 = 10;

/// Upper bound on the number of changed files that are considered.
pub const MAX_FILES: usize = PAGE_SIZE as usize * MAX_PAGES as usize;

/// Fetches the changed file names of a pull request.
///
/// The result is sorted and holds at most [`MAX_FILES`] entries. The first failing
/// page aborts the remaining requests and its error is returned.
///
/// # Errors
///
/// Returns `LabelItError::GitProviderError` if a page request fails, or
/// `LabelItError::TaskFailed` if a page task panics.
#[instrument(skip(provider))]
pub async fn fetch_changed_files<P: PullRequestProvider + 'static>(
    provider: Arc<P>,
    repo_owner: &str,
    repo_name: &str,
    pr_number: u64,
) -> Result<Vec<String>, LabelItError> {
    let mut pages = JoinSet::new();
    spawn_page(&mut pages, &provider, repo_owner, repo_name, pr_number, 1);

    let mut files = Vec::new();
    while let Some(joined) = pages.join_next().await {
        let (page, result) = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                pages.abort_all();
                return Err(LabelItError::TaskFailed(e.to_string()));
            }
        };

        let batch = match result {
            Ok(batch) => batch,
            Err(e) => {
                warn!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    pull_request = pr_number,
                    page = page,
                    error = e.to_string(),
                    "Failed to fetch a page of changed files"
                );
                pages.abort_all();
                return Err(e.into());
            }
        };

        debug!(
            repository_owner = repo_owner,
            repository = repo_name,
            pull_request = pr_number,
            page = page,
            count = batch.len(),
            "Fetched page of changed files"
        );

        if batch.len() >= PAGE_SIZE as usize && page < MAX_PAGES {
            spawn_page(
                &mut pages,
                &provider,
                repo_owner,
                repo_name,
                pr_number,
                page + 1,
            );
        }

        files.extend(batch.into_iter().map(|f| f.filename));
    }

    files.sort();
    files.truncate(MAX_FILES);

    Ok(files)
}

type PageOutcome = (u32, Result<Vec<PullRequestFile>, PlatformError>);

fn spawn_page<P: PullRequestProvider + 'static>(
    pages: &mut JoinSet<PageOutcome>,
    provider: &Arc<P>,
    repo_owner: &str,
    repo_name: &str,
    pr_number: u64,
    page: u32,
) {
    let provider = Arc::clone(provider);
    let repo_owner = repo_owner.to_string();
    let repo_name = repo_name.to_string();
    pages.spawn(async move {
        let result = provider
            .list_pull_request_files(&repo_owner, &repo_name, pr_number, page, PAGE_SIZE)
            .await;
        (page, result)
    });
}
