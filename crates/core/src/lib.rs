//! # Label It Core
//!
//! Core logic for adding labels to the open pull requests of a repository based on
//! configurable rules.
//!
//! A run has three phases:
//! - list the open pull requests
//! - work out which configured labels each pull request should gain
//! - add those labels
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use label_it_core::config::load_label_it_config;
//! use label_it_core::errors::LabelItError;
//! use label_it_core::Labeler;
//! use label_it_developer_platforms::PullRequestProvider;
//! use std::sync::Arc;
//!
//! async fn label<P: PullRequestProvider + 'static>(provider: Arc<P>) -> Result<(), LabelItError> {
//!     let config = load_label_it_config("label-it.yaml")?;
//!     let labeler = Labeler::from_config(provider, &config)?;
//!
//!     let pull_requests = labeler.list_open_pull_requests().await?;
//!     let assignments = labeler.determine_label_assignments(&pull_requests).await?;
//!     for message in labeler.apply_label_assignments(&assignments).await? {
//!         println!("{}", message);
//!     }
//!
//!     Ok(())
//! }
//! ```

use label_it_developer_platforms::models::PullRequest;
use label_it_developer_platforms::PullRequestProvider;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub mod apply;
pub mod config;
use config::LabelItConfig;

pub mod criteria;

pub mod errors;
use errors::LabelItError;

pub mod files;

pub mod rules;
use rules::{LabelAssignment, RuleSet};

#[cfg(test)]
mod test_support;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Applies a [`RuleSet`] to the open pull requests of one repository.
///
/// The provider is shared with the tasks that fetch changed files and add labels,
/// so it is held behind an [`Arc`].
#[derive(Debug)]
pub struct Labeler<P: PullRequestProvider + 'static> {
    provider: Arc<P>,
    repo_owner: String,
    repo_name: String,
    rules: RuleSet,
}

impl<P: PullRequestProvider + 'static> Labeler<P> {
    pub fn new(provider: Arc<P>, repo_owner: &str, repo_name: &str, rules: RuleSet) -> Self {
        Self {
            provider,
            repo_owner: repo_owner.to_string(),
            repo_name: repo_name.to_string(),
            rules,
        }
    }

    /// Creates a labeler for the repository and rules named in the configuration.
    ///
    /// # Errors
    ///
    /// Returns `LabelItError::PatternError` if a rule holds an invalid regular expression.
    pub fn from_config(provider: Arc<P>, config: &LabelItConfig) -> Result<Self, LabelItError> {
        let rules = RuleSet::from_config(&config.rules)?;
        Ok(Self::new(provider, &config.owner, &config.repo, rules))
    }

    pub fn repo_owner(&self) -> &str {
        &self.repo_owner
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Lists the open pull requests of the repository.
    #[instrument(skip(self), fields(repository_owner = %self.repo_owner, repository = %self.repo_name))]
    pub async fn list_open_pull_requests(&self) -> Result<Vec<PullRequest>, LabelItError> {
        let pull_requests = self
            .provider
            .list_open_pull_requests(&self.repo_owner, &self.repo_name)
            .await?;

        info!(
            repository_owner = self.repo_owner,
            repository = self.repo_name,
            count = pull_requests.len(),
            "Found open pull requests"
        );

        Ok(pull_requests)
    }

    /// Works out the labels each pull request should gain.
    ///
    /// Changed files are fetched only when a rule has a file criteria. Pull requests
    /// that gain no label are left out, the rest keep their input order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while fetching changed files.
    #[instrument(skip(self, pull_requests), fields(count = pull_requests.len()))]
    pub async fn determine_label_assignments(
        &self,
        pull_requests: &[PullRequest],
    ) -> Result<Vec<LabelAssignment>, LabelItError> {
        let requires_files = self.rules.requires_files();

        let mut assignments = Vec::new();
        for pr in pull_requests {
            let files = if requires_files {
                files::fetch_changed_files(
                    Arc::clone(&self.provider),
                    &self.repo_owner,
                    &self.repo_name,
                    pr.number,
                )
                .await?
            } else {
                Vec::new()
            };

            match self.rules.match_pull_request(pr, &files) {
                Some(assignment) => {
                    debug!(
                        repository_owner = self.repo_owner,
                        repository = self.repo_name,
                        pull_request = pr.number,
                        labels = assignment.labels.join(", "),
                        "Pull request gains labels"
                    );
                    assignments.push(assignment);
                }
                None => {
                    debug!(
                        repository_owner = self.repo_owner,
                        repository = self.repo_name,
                        pull_request = pr.number,
                        "No new labels for pull request"
                    );
                }
            }
        }

        Ok(assignments)
    }

    /// Adds the labels to the pull requests and returns one message per update.
    pub async fn apply_label_assignments(
        &self,
        assignments: &[LabelAssignment],
    ) -> Result<Vec<String>, LabelItError> {
        apply::apply_label_assignments(
            Arc::clone(&self.provider),
            &self.repo_owner,
            &self.repo_name,
            assignments,
        )
        .await
    }
}
