//! # Criteria Evaluation
//!
//! This module decides whether a single pull request field, or the set of files a
//! pull request changes, satisfies a configured [`Criteria`].
//!
//! Regular expressions are compiled once, when a [`CompiledCriteria`] is built from
//! configuration. A pattern that does not compile is a configuration error and is
//! reported before any pull request is evaluated.

use regex::Regex;
use std::borrow::Cow;

use crate::config::Criteria;
use crate::errors::LabelItError;

#[cfg(test)]
#[path = "criteria_tests.rs"]
mod tests;

/// A value that criteria can be evaluated against.
///
/// `exact`/`no-exact` compare values of the subject type directly. The regular
/// expression predicates see the subject's text form.
pub trait CriteriaSubject {
    fn as_text(&self) -> Cow<'_, str>;
}

impl CriteriaSubject for str {
    fn as_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl CriteriaSubject for u64 {
    fn as_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

/// A [`Criteria`] with its regular expressions compiled.
///
/// # Examples
///
/// ```
/// use label_it_core::config::Criteria;
/// use label_it_core::criteria::CompiledCriteria;
///
/// let criteria: Criteria<String> = Criteria {
///     match_pattern: Some("^feature/".to_string()),
///     ..Criteria::default()
/// };
/// let compiled = CompiledCriteria::compile(&criteria).unwrap();
///
/// assert!(compiled.evaluate("feature/login"));
/// assert!(!compiled.evaluate("hotfix/urgent"));
/// ```
#[derive(Debug, Clone)]
pub struct CompiledCriteria<T> {
    exact: Option<T>,
    no_exact: Option<T>,
    match_pattern: Option<Regex>,
    no_match_pattern: Option<Regex>,
}

impl<T: Clone> CompiledCriteria<T> {
    /// Compiles the regular expressions of `criteria`.
    ///
    /// # Errors
    ///
    /// Returns `LabelItError::PatternError` if either pattern is not a valid regular expression.
    pub fn compile(criteria: &Criteria<T>) -> Result<Self, LabelItError> {
        Ok(Self {
            exact: criteria.exact.clone(),
            no_exact: criteria.no_exact.clone(),
            match_pattern: compile_pattern(criteria.match_pattern.as_deref())?,
            no_match_pattern: compile_pattern(criteria.no_match_pattern.as_deref())?,
        })
    }

    /// Returns `true` when no predicate is set. An empty criteria passes everything.
    pub fn is_empty(&self) -> bool {
        self.exact.is_none()
            && self.no_exact.is_none()
            && self.match_pattern.is_none()
            && self.no_match_pattern.is_none()
    }

    /// Decides whether a single value passes.
    ///
    /// Predicates are checked in the order `exact`, `no-exact`, `match`, `no-match`
    /// and the first failing one ends the evaluation.
    pub fn evaluate<S>(&self, subject: &S) -> bool
    where
        S: CriteriaSubject + ?Sized,
        T: PartialEq<S>,
    {
        if matches!(&self.exact, Some(exact) if exact != subject) {
            return false;
        }

        if matches!(&self.no_exact, Some(no_exact) if no_exact == subject) {
            return false;
        }

        if self.match_pattern.is_none() && self.no_match_pattern.is_none() {
            return true;
        }

        let text = subject.as_text();
        if matches!(&self.match_pattern, Some(re) if !re.is_match(&text)) {
            return false;
        }

        if matches!(&self.no_match_pattern, Some(re) if re.is_match(&text)) {
            return false;
        }

        true
    }
}

impl CompiledCriteria<String> {
    /// Decides whether a set of changed file paths passes.
    ///
    /// `files` must be sorted; `exact` and `no-exact` use a binary search.
    ///
    /// * `exact` passes if the path is in the set
    /// * `no-exact` fails if the path is in the set
    /// * `match` passes if at least one path matches
    /// * `no-match` fails if any path matches
    ///
    /// An empty criteria passes without looking at `files`.
    pub fn evaluate_file_set(&self, files: &[String]) -> bool {
        if self.is_empty() {
            return true;
        }

        if let Some(exact) = &self.exact {
            if files.binary_search(exact).is_err() {
                return false;
            }
        }

        if let Some(no_exact) = &self.no_exact {
            if files.binary_search(no_exact).is_ok() {
                return false;
            }
        }

        if let Some(re) = &self.match_pattern {
            if !files.iter().any(|f| re.is_match(f)) {
                return false;
            }
        }

        if let Some(re) = &self.no_match_pattern {
            if files.iter().any(|f| re.is_match(f)) {
                return false;
            }
        }

        true
    }
}

fn compile_pattern(pattern: Option<&str>) -> Result<Option<Regex>, LabelItError> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|source| LabelItError::PatternError {
                pattern: p.to_string(),
                source,
            })
        })
        .transpose()
}
