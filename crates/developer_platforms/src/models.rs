//! # Models
//!
//! This module contains the data models used when talking to a developer platform.
//!
//! The models mirror the subset of the GitHub REST payloads that label-it reads:
//! open pull requests, their labels and their changed files. They are designed to be
//! deserialized straight from the API responses and carry no behaviour of their own.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// A branch reference on either side of a pull request.
///
/// # Examples
///
/// ```
/// use label_it_developer_platforms::models::BranchRef;
///
/// let head: BranchRef = serde_json::from_str(r#"{"ref": "feature/login", "sha": "abc123"}"#).unwrap();
/// assert_eq!(head.reference, "feature/login");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BranchRef {
    /// The branch name, e.g. `feature/login`
    #[serde(rename = "ref")]
    pub reference: String,

    /// The commit the branch pointed to when the pull request was read
    #[serde(default)]
    pub sha: Option<String>,
}

/// Represents a label on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// The name of the label
    pub name: String,
}

/// Represents an open pull request.
///
/// This is a read-only snapshot of the fields that rules can match on.
///
/// # Fields
///
/// * `number` - The pull request (issue) number
/// * `title` - The title of the pull request
/// * `body` - The description of the pull request, if any
/// * `head` - The branch the changes come from
/// * `base` - The branch the changes go into
/// * `user` - The author of the pull request, if known
/// * `labels` - The labels already attached to the pull request
///
/// # Examples
///
/// ```
/// use label_it_developer_platforms::models::{BranchRef, PullRequest, User};
///
/// let pr = PullRequest {
///     number: 42,
///     title: "Add login page".to_string(),
///     body: None,
///     head: BranchRef { reference: "feature/login".to_string(), sha: None },
///     base: BranchRef { reference: "main".to_string(), sha: None },
///     user: Some(User { login: "octocat".to_string() }),
///     labels: Vec::new(),
/// };
///
/// assert!(!pr.has_label("needs-review"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// The pull request number
    pub number: u64,

    /// The title of the pull request
    #[serde(default)]
    pub title: String,

    /// The description/body of the pull request, if any
    #[serde(default)]
    pub body: Option<String>,

    /// The source branch
    pub head: BranchRef,

    /// The target branch
    pub base: BranchRef,

    /// The user that opened the pull request
    #[serde(default)]
    pub user: Option<User>,

    /// Labels currently attached to the pull request
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl PullRequest {
    /// Returns the login of the author, or an empty string if the platform did not report one.
    pub fn author_login(&self) -> &str {
        self.user.as_ref().map(|u| u.login.as_str()).unwrap_or_default()
    }

    /// Returns the body, or an empty string for pull requests without a description.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }

    /// Returns `true` if the pull request already carries a label with exactly this name.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }
}

/// A single file changed by a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestFile {
    /// Path of the file relative to the repository root
    pub filename: String,

    /// Change status reported by the platform, e.g. `added` or `modified`
    #[serde(default)]
    pub status: Option<String>,
}

/// The author of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The login name of the user
    pub login: String,
}
