//! # Rules
//!
//! A [`Rule`] pairs a label with one compiled criteria per pull request field. The
//! [`RuleSet`] is built once per run from configuration and is read-only afterwards.
//!
//! Matching is a pure function of the rule set, a pull request and (when some rule
//! needs it) the sorted list of files the pull request changes.

use label_it_developer_platforms::models::PullRequest;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RuleConfig;
use crate::criteria::CompiledCriteria;
use crate::errors::LabelItError;

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;

/// Labels to add to one pull request.
///
/// Only produced for pull requests that gained at least one new label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelAssignment {
    /// The pull request (issue) number
    pub issue: u64,

    /// Label names in rule configuration order
    pub labels: Vec<String>,
}

/// A label and the criteria a pull request must satisfy to receive it.
#[derive(Debug, Clone)]
pub struct Rule {
    label: String,
    head: CompiledCriteria<String>,
    base: CompiledCriteria<String>,
    title: CompiledCriteria<String>,
    body: CompiledCriteria<String>,
    user: CompiledCriteria<String>,
    number: CompiledCriteria<u64>,
    files: CompiledCriteria<String>,
}

impl Rule {
    /// Builds a rule from its configuration, compiling every pattern.
    ///
    /// # Errors
    ///
    /// Returns `LabelItError::PatternError` for the first pattern that does not compile.
    pub fn from_config(config: &RuleConfig) -> Result<Self, LabelItError> {
        Ok(Self {
            label: config.label.clone(),
            head: CompiledCriteria::compile(&config.head)?,
            base: CompiledCriteria::compile(&config.base)?,
            title: CompiledCriteria::compile(&config.title)?,
            body: CompiledCriteria::compile(&config.body)?,
            user: CompiledCriteria::compile(&config.user)?,
            number: CompiledCriteria::compile(&config.number)?,
            files: CompiledCriteria::compile(&config.file)?,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` if this rule has a changed-files criteria.
    pub fn requires_files(&self) -> bool {
        !self.files.is_empty()
    }

    /// Returns `true` if every criteria passes for the pull request.
    ///
    /// `files` must be sorted. It is ignored when the rule has no file criteria.
    pub fn matches(&self, pr: &PullRequest, files: &[String]) -> bool {
        self.head.evaluate(pr.head.reference.as_str())
            && self.base.evaluate(pr.base.reference.as_str())
            && self.title.evaluate(pr.title.as_str())
            && self.body.evaluate(pr.body_text())
            && self.user.evaluate(pr.author_login())
            && self.number.evaluate(&pr.number)
            && self.files.evaluate_file_set(files)
    }
}

/// The rules of a run, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Materializes one [`Rule`] per configured entry.
    ///
    /// # Errors
    ///
    /// Returns `LabelItError::PatternError` if any pattern fails to compile. No partial
    /// rule set is returned.
    pub fn from_config(rules: &[RuleConfig]) -> Result<Self, LabelItError> {
        let rules = rules
            .iter()
            .map(Rule::from_config)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns `true` if any rule needs the changed files of a pull request.
    ///
    /// When this is `false` the file listing never has to be fetched.
    pub fn requires_files(&self) -> bool {
        self.rules.iter().any(Rule::requires_files)
    }

    /// Computes the labels to add to a single pull request.
    ///
    /// Rules whose label the pull request already carries are skipped without being
    /// evaluated. Returns `None` if no new label matched.
    pub fn match_pull_request(&self, pr: &PullRequest, files: &[String]) -> Option<LabelAssignment> {
        let mut labels = Vec::new();
        for rule in &self.rules {
            if pr.has_label(rule.label()) {
                debug!(
                    pull_request = pr.number,
                    label = rule.label(),
                    "Pull request already has the label. Skipping rule"
                );
                continue;
            }

            if rule.matches(pr, files) {
                debug!(
                    pull_request = pr.number,
                    label = rule.label(),
                    "Pull request matched rule"
                );
                labels.push(rule.label().to_string());
            }
        }

        if labels.is_empty() {
            None
        } else {
            Some(LabelAssignment {
                issue: pr.number,
                labels,
            })
        }
    }
}
