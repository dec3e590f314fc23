//! Error types for the Shopkeep CLI

use thiserror::Error;

/// Result type alias for Shopkeep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown when the API could not be reached
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Message shown for failures that carry nothing useful for the user
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No store found for this account. Run `shopkeep store create` first.")]
    MissingStore,
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Failures of calls against the storefront API.
///
/// The display string is what the user sees, so `Rejected` renders the
/// server's own message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network(String),

    #[error("{}", UNEXPECTED_ERROR_MESSAGE)]
    Unexpected(String),

    #[error("Request was superseded by a newer one")]
    Superseded,

    #[error("Not signed in. Run `shopkeep login` first.")]
    NotAuthenticated,
}

impl AuthError {
    /// Diagnostic detail for logs; the display string stays user-facing
    pub fn detail(&self) -> String {
        match self {
            AuthError::Rejected { status, message } => format!("HTTP {}: {}", status, message),
            AuthError::Network(detail) | AuthError::Unexpected(detail) => detail.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AuthError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            AuthError::Network("Failed to connect to API".to_string())
        } else if err.is_request() {
            AuthError::Network(err.to_string())
        } else {
            AuthError::Unexpected(err.to_string())
        }
    }
}

/// Form input rejected before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Durable storage failures.
///
/// Never escapes the session store: callers there only observe absence.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
