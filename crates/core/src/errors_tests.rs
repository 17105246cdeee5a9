use super::*;
use std::error::Error as StdError;

#[test]
fn test_unsupported_api_version_display() {
    let err = ConfigLoadError::UnsupportedApiVersion {
        found: 2,
        expected: 1,
    };

    assert_eq!(
        err.to_string(),
        "Unsupported config apiVersion 2. This tool requires version 1"
    );
}

#[test]
fn test_config_error_wraps_load_error() {
    let err: LabelItError = ConfigLoadError::NotFound("label-it.yaml".to_string()).into();

    assert!(matches!(err, LabelItError::ConfigError(_)));
    assert_eq!(
        err.to_string(),
        "Configuration error: Configuration file not found: label-it.yaml"
    );
}

#[test]
fn test_pattern_error_keeps_the_pattern_and_source() {
    let source = regex::Regex::new("(unclosed").unwrap_err();
    let err = LabelItError::PatternError {
        pattern: "(unclosed".to_string(),
        source,
    };

    assert!(err
        .to_string()
        .starts_with("Invalid regular expression '(unclosed'"));
    assert!(err.source().is_some());
}

#[test]
fn test_provider_error_conversion() {
    let err: LabelItError = PlatformError::RateLimitExceeded.into();

    assert!(matches!(err, LabelItError::GitProviderError(_)));
    assert_eq!(err.to_string(), "Git provider error: Rate limit exceeded");
}

#[test]
fn test_env_var_not_found_display() {
    let err = ConfigLoadError::EnvVarNotFound("GITHUB_TOKEN".to_string());

    assert_eq!(
        err.to_string(),
        "Environment variable 'GITHUB_TOKEN' referenced by the access configuration is not set"
    );
}
