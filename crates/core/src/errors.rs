use label_it_developer_platforms::errors::Error as PlatformError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while loading the rule configuration file.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported config apiVersion {found}. This tool requires version {expected}")]
    UnsupportedApiVersion { found: u32, expected: u32 },

    #[error("Environment variable '{0}' referenced by the access configuration is not set")]
    EnvVarNotFound(String),

    #[error("Invalid rule configuration: {0}")]
    InvalidRule(String),
}

/// Errors that abort a labeling run.
#[derive(Error, Debug)]
pub enum LabelItError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigLoadError),

    #[error("Invalid regular expression '{pattern}': {source}")]
    PatternError {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Git provider error: {0}")]
    GitProviderError(#[from] PlatformError),

    #[error("Background task failed: {0}")]
    TaskFailed(String),
}
