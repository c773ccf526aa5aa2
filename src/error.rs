//! Error types for the RepoNest library manager.

use thiserror::Error;

/// Input rejected before any edit is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("repository URL is required")]
    MissingUrl,

    #[error("repository URL must start with https://github.com/ or https://gitlab.com/")]
    BadScheme,
}

impl ValidationError {
    /// Stable identifier for the failure, suitable for callers that branch on it.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "empty-name",
            ValidationError::MissingUrl => "missing-url",
            ValidationError::BadScheme => "bad-scheme",
        }
    }
}

/// Persistence boundary errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid library document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Store not configured: {0}")]
    NotConfigured(String),
}

/// Lifecycle and mutation errors raised by the library manager
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Validation failed ({kind}): {0}", kind = .0.kind())]
    Validation(#[from] ValidationError),

    #[error("Import rejected: {0}")]
    Import(String),

    #[error("No library document or seed document is available")]
    NoData,

    #[error("Library is not ready")]
    NotReady,

    #[error("Invalid selection key: {0}")]
    InvalidSelectionKey(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors surfaced through the configuration and command-line layers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Refused: {0}")]
    Refused(String),

    #[error("Failed to get user input: {0}")]
    Prompt(String),

    #[error("{0} write(s) to the store failed; see the log for details")]
    PersistFailed(u64),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Library(LibraryError::Validation(err))
    }
}
