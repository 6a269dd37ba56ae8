/*!
 * Error types for the romanize engine.
 *
 * Provider failures are caught inside the strategies and never reach the
 * caller of the engine; only contract errors (`TransliterationError`)
 * and CLI-level problems (`AppError`) propagate.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The call did not finish before its deadline
    #[error("Deadline exceeded after {0:?}")]
    Timeout(std::time::Duration),
}

impl ProviderError {
    /// Map a non-success HTTP status and body to the matching variant
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 | 403 => Self::AuthenticationError(body),
            429 => Self::RateLimitExceeded(body),
            code => Self::ApiError { status_code: code, message: body },
        }
    }

    /// Classify a transport error from reqwest
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Why a single romanization attempt produced no usable output.
///
/// All variants make the orchestrator move on to the next strategy; they
/// only differ in how they are logged.
#[derive(Error, Debug)]
pub enum AttemptError {
    /// The strategy does not apply (wrong script, no mapping, no credential)
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// The strategy applied but the call failed
    #[error("provider failure: {0}")]
    Failed(#[from] ProviderError),

    /// The strategy answered but the answer is not an acceptable romanization
    #[error("rejected: {0}")]
    Rejected(String),
}

impl AttemptError {
    /// Shorthand for an unavailable outcome
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}

/// Contract errors raised by the engine itself
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TransliterationError {
    /// The caller invoked the engine without any text
    #[error("No input text was provided")]
    MissingInput,
}

/// Errors surfaced by the command-line binary
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
