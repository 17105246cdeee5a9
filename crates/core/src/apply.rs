//! # Label Application
//!
//! Sends every [`LabelAssignment`] to the platform. Pull requests are updated
//! concurrently and the call returns once all of them have finished.

use label_it_developer_platforms::PullRequestProvider;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, instrument, warn};

use crate::errors::LabelItError;
use crate::rules::LabelAssignment;

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;

/// Formats the completion message for one applied assignment.
///
/// # Examples
///
/// ```
/// use label_it_core::apply::completion_message;
/// use label_it_core::rules::LabelAssignment;
///
/// let assignment = LabelAssignment { issue: 42, labels: vec!["a".to_string(), "b".to_string()] };
/// assert_eq!(completion_message(&assignment), "Added labels \"a, b\" to PR #42");
/// ```
pub fn completion_message(assignment: &LabelAssignment) -> String {
    format!(
        "Added labels \"{}\" to PR #{}",
        assignment.labels.join(", "),
        assignment.issue
    )
}

/// Adds the labels of every assignment to its pull request.
///
/// Returns one completion message per assignment, in completion order. If any
/// update fails the remaining updates are cancelled and the first error is returned.
/// Updates that already completed are not rolled back.
///
/// # Errors
///
/// Returns `LabelItError::GitProviderError` for a failed update, or
/// `LabelItError::TaskFailed` if an update task panics.
#[instrument(skip(provider, assignments), fields(count = assignments.len()))]
pub async fn apply_label_assignments<P: PullRequestProvider + 'static>(
    provider: Arc<P>,
    repo_owner: &str,
    repo_name: &str,
    assignments: &[LabelAssignment],
) -> Result<Vec<String>, LabelItError> {
    let mut updates = JoinSet::new();
    for assignment in assignments.iter().cloned() {
        let provider = Arc::clone(&provider);
        let repo_owner = repo_owner.to_string();
        let repo_name = repo_name.to_string();
        updates.spawn(async move {
            provider
                .add_labels(
                    &repo_owner,
                    &repo_name,
                    assignment.issue,
                    &assignment.labels,
                )
                .await
                .map(|_| assignment)
        });
    }

    let mut messages = Vec::with_capacity(assignments.len());
    while let Some(joined) = updates.join_next().await {
        let result = match joined {
            Ok(result) => result,
            Err(e) => {
                updates.abort_all();
                return Err(LabelItError::TaskFailed(e.to_string()));
            }
        };

        match result {
            Ok(assignment) => {
                info!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    pull_request = assignment.issue,
                    labels = assignment.labels.join(", "),
                    "Added labels to pull request"
                );
                messages.push(completion_message(&assignment));
            }
            Err(e) => {
                warn!(
                    repository_owner = repo_owner,
                    repository = repo_name,
                    error = e.to_string(),
                    "Failed to add labels. Cancelling remaining updates"
                );
                updates.abort_all();
                return Err(e.into());
            }
        }
    }

    Ok(messages)
}
