//! Shared mock provider and pull request builders for the unit tests of this crate.

use async_trait::async_trait;
use label_it_developer_platforms::errors::Error;
use label_it_developer_platforms::models::{BranchRef, Label, PullRequest, PullRequestFile, User};
use label_it_developer_platforms::PullRequestProvider;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn pull_request(number: u64, head: &str) -> PullRequest {
    PullRequest {
        number,
        title: format!("Pull request {}", number),
        body: None,
        head: BranchRef {
            reference: head.to_string(),
            sha: None,
        },
        base: BranchRef {
            reference: "main".to_string(),
            sha: None,
        },
        user: Some(User {
            login: "octocat".to_string(),
        }),
        labels: Vec::new(),
    }
}

pub fn with_labels(mut pr: PullRequest, labels: &[&str]) -> PullRequest {
    pr.labels = labels
        .iter()
        .map(|name| Label {
            name: name.to_string(),
        })
        .collect();
    pr
}

#[derive(Debug, Default)]
pub struct MockProvider {
    pub pull_requests: Vec<PullRequest>,
    pub files: HashMap<u64, Vec<String>>,

    /// Every file page is full, no matter how far the caller pages
    pub always_full_pages: bool,

    pub fail_list: bool,
    pub fail_files_on_page: Option<u32>,
    pub fail_labels_for: Option<u64>,

    pub file_requests: Mutex<Vec<(u64, u32)>>,
    pub added_labels: Mutex<Vec<(u64, Vec<String>)>>,
}

impl MockProvider {
    pub fn new(pull_requests: Vec<PullRequest>) -> Self {
        Self {
            pull_requests,
            ..Self::default()
        }
    }

    pub fn with_files(mut self, pr_number: u64, files: &[&str]) -> Self {
        self.files
            .insert(pr_number, files.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn requested_pages(&self, pr_number: u64) -> Vec<u32> {
        let mut pages: Vec<u32> = self
            .file_requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(number, _)| *number == pr_number)
            .map(|(_, page)| *page)
            .collect();
        pages.sort();
        pages
    }

    pub fn file_request_count(&self) -> usize {
        self.file_requests.lock().unwrap().len()
    }

    pub fn applied(&self) -> Vec<(u64, Vec<String>)> {
        let mut applied = self.added_labels.lock().unwrap().clone();
        applied.sort();
        applied
    }
}

#[async_trait]
impl PullRequestProvider for MockProvider {
    async fn list_open_pull_requests(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
    ) -> Result<Vec<PullRequest>, Error> {
        if self.fail_list {
            return Err(Error::ApiError("listing failed".to_string()));
        }

        Ok(self.pull_requests.clone())
    }

    async fn list_pull_request_files(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
        pr_number: u64,
        page: u32,
        per_page: u8,
    ) -> Result<Vec<PullRequestFile>, Error> {
        self.file_requests.lock().unwrap().push((pr_number, page));

        if self.fail_files_on_page == Some(page) {
            return Err(Error::ApiError(format!("page {} failed", page)));
        }

        let per_page = per_page as usize;
        let start = (page as usize - 1) * per_page;

        let names: Vec<String> = if self.always_full_pages {
            (start..start + per_page)
                .map(|i| format!("generated/{:05}.txt", i))
                .collect()
        } else {
            self.files
                .get(&pr_number)
                .map(|all| all.iter().skip(start).take(per_page).cloned().collect())
                .unwrap_or_default()
        };

        Ok(names
            .into_iter()
            .map(|filename| PullRequestFile {
                filename,
                status: Some("modified".to_string()),
            })
            .collect())
    }

    async fn add_labels(
        &self,
        _repo_owner: &str,
        _repo_name: &str,
        pr_number: u64,
        labels: &[String],
    ) -> Result<(), Error> {
        if self.fail_labels_for == Some(pr_number) {
            return Err(Error::FailedToUpdatePullRequest(format!(
                "Failed to add labels to #{}",
                pr_number
            )));
        }

        self.added_labels
            .lock()
            .unwrap()
            .push((pr_number, labels.to_vec()));
        Ok(())
    }
}
