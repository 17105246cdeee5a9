//! Configuration settings for label-it.
//!
//! The rule file is a YAML document decoded once at start-up into an immutable
//! [`LabelItConfig`]. The value is then passed by reference to everything that needs it;
//! nothing reads configuration from global state.
//!
//! ```yaml
//! apiVersion: 1
//! access:
//!   user: octocat
//!   token: $GITHUB_TOKEN
//! owner: octo-org
//! repo: octo-repo
//! rules:
//!   - label: needs-review
//!     head-rule:
//!       match: "^feature/"
//!     number-rule:
//!       no-exact: 1
//! ```
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::ConfigLoadError;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// The config `apiVersion` this build understands
pub const CURRENT_API_VERSION: u32 = 1;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "label-it.yaml";

/// Prefix marking an access value as the name of an environment variable
const ENV_VAR_PREFIX: char = '$';

/// Top-level configuration for label-it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LabelItConfig {
    /// Version of the configuration schema
    #[serde(rename = "apiVersion")]
    pub api_version: u32,

    /// Credentials used to talk to GitHub
    pub access: AccessConfig,

    /// Owner (user or organization) of the repository to label
    pub owner: String,

    /// Name of the repository to label
    pub repo: String,

    /// Base URL of the API, for GitHub Enterprise installations
    #[serde(default, rename = "api-url", skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Labeling rules, evaluated in order
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// Credentials for the GitHub API.
///
/// Either value may be written as `$NAME`, in which case it is read from the
/// environment variable `NAME` when the configuration is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AccessConfig {
    /// User name for basic authentication. Token authentication is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Personal access token
    pub token: String,
}

/// A field-level rule with four independently optional predicates.
///
/// `T` is the type of the `exact`/`no-exact` values: `String` for text fields and
/// `u64` for the pull request number. The regular expression predicates are always
/// strings. An absent predicate never causes a rule to fail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Criteria<T> {
    /// The value must be equal to this
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact: Option<T>,

    /// The value must not be equal to this
    #[serde(default, rename = "no-exact", skip_serializing_if = "Option::is_none")]
    pub no_exact: Option<T>,

    /// The value must match this regular expression
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_pattern: Option<String>,

    /// The value must not match this regular expression
    #[serde(default, rename = "no-match", skip_serializing_if = "Option::is_none")]
    pub no_match_pattern: Option<String>,
}

impl<T> Criteria<T> {
    /// Returns `true` when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.exact.is_none()
            && self.no_exact.is_none()
            && self.match_pattern.is_none()
            && self.no_match_pattern.is_none()
    }
}

impl<T> Default for Criteria<T> {
    fn default() -> Self {
        Self {
            exact: None,
            no_exact: None,
            match_pattern: None,
            no_match_pattern: None,
        }
    }
}

/// The rules for a single label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Label added when every criteria passes
    pub label: String,

    #[serde(default, rename = "head-rule", alias = "head")]
    pub head: Criteria<String>,

    #[serde(default, rename = "base-rule", alias = "base")]
    pub base: Criteria<String>,

    #[serde(default, rename = "title-rule", alias = "title")]
    pub title: Criteria<String>,

    #[serde(default, rename = "body-rule", alias = "body")]
    pub body: Criteria<String>,

    /// Matched against the login of the pull request author
    #[serde(default, rename = "user-rule", alias = "user")]
    pub user: Criteria<String>,

    #[serde(default, rename = "number-rule", alias = "number")]
    pub number: Criteria<u64>,

    /// Matched against the set of files the pull request changes
    #[serde(default, rename = "file-rule", alias = "file")]
    pub file: Criteria<String>,
}

/// Loads the label-it configuration from the given path.
///
/// # Arguments
/// * `path` - Path to the YAML configuration file
///
/// # Returns
/// * `Ok(LabelItConfig)` if loaded and valid
/// * `Err(ConfigLoadError)` if the file is missing, malformed, has an unsupported
///   `apiVersion`, or references an unset environment variable
pub fn load_label_it_config<P: AsRef<Path>>(path: P) -> Result<LabelItConfig, ConfigLoadError> {
    let path_ref = path.as_ref();
    debug!("Loading configuration from {:?}", path_ref);

    let content = match fs::read_to_string(path_ref) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigLoadError::NotFound(path_ref.display().to_string()));
        }
        Err(e) => return Err(ConfigLoadError::Io(e)),
    };

    let config = parse_label_it_config(&content)?;
    info!(
        repository_owner = config.owner.as_str(),
        repository = config.repo.as_str(),
        rules = config.rules.len(),
        "Loaded configuration"
    );

    Ok(config)
}

/// Parses and validates a configuration document.
///
/// Access values of the form `$NAME` are replaced by the value of the environment
/// variable `NAME`.
pub fn parse_label_it_config(content: &str) -> Result<LabelItConfig, ConfigLoadError> {
    let mut config: LabelItConfig = serde_yaml::from_str(content)?;

    if config.api_version != CURRENT_API_VERSION {
        return Err(ConfigLoadError::UnsupportedApiVersion {
            found: config.api_version,
            expected: CURRENT_API_VERSION,
        });
    }

    for (index, rule) in config.rules.iter().enumerate() {
        if rule.label.trim().is_empty() {
            return Err(ConfigLoadError::InvalidRule(format!(
                "rule {} has an empty label",
                index + 1
            )));
        }
    }

    let lookup = |name: &str| std::env::var(name).ok();
    config.access.token = resolve_access_value(&config.access.token, lookup)?;
    if let Some(user) = config.access.user.take() {
        config.access.user = Some(resolve_access_value(&user, lookup)?);
    }

    Ok(config)
}

fn resolve_access_value<F>(value: &str, lookup: F) -> Result<String, ConfigLoadError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(name) = value.strip_prefix(ENV_VAR_PREFIX) else {
        return Ok(value.to_string());
    };

    match lookup(name) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigLoadError::EnvVarNotFound(name.to_string())),
    }
}
