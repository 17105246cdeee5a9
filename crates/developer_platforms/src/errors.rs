#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types for developer platform operations.
///
/// This enum represents all possible errors that can occur when talking to a
/// developer platform like GitHub. Every variant is fatal for a labeling run;
/// callers propagate them rather than retrying.
///
/// # Examples
///
/// ```rust
/// use label_it_developer_platforms::errors::Error;
///
/// let auth_error = Error::AuthError("Invalid token".to_string());
/// assert_eq!(auth_error.to_string(), "Authentication failed: Invalid token");
///
/// let rate_limit = Error::RateLimitExceeded;
/// assert_eq!(rate_limit.to_string(), "Rate limit exceeded");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Generic API request failure.
    ///
    /// The request reached the platform (or tried to) but failed for a reason
    /// other than authentication or rate limiting. The string parameter contains
    /// the operation that failed and the underlying cause.
    #[error("API request failed: {0}")]
    ApiError(String),

    /// Authentication failed with the platform.
    ///
    /// The provided credentials are invalid, expired, or insufficient for the
    /// requested operation, or the client could not be built from them.
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Failed to update pull request.
    ///
    /// Raised when adding labels to a pull request is rejected by the platform.
    /// The string parameter contains specific details about what operation failed.
    #[error("Failed to update the PR: {0}")]
    FailedToUpdatePullRequest(String),

    /// Invalid response format from platform API.
    ///
    /// The response received from the platform could not be decoded into the
    /// expected shape, e.g. malformed JSON or missing required fields.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Platform rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}
