/// Centralized error types for git-search-mcp using thiserror
///
/// Every failure inside the search pipeline maps to one `SearchError` variant so
/// callers can branch on the kind of failure instead of parsing messages.
use thiserror::Error;

/// Errors produced while selecting, rendering or reporting commits
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid git repository '{path}': {reason}")]
    InvalidRepository { path: String, reason: String },

    #[error("Invalid regex pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid file glob '{glob}': {reason}")]
    InvalidPathFilter { glob: String, reason: String },

    #[error("Failed to read git history: {0}")]
    History(#[from] git2::Error),

    #[error("Invalid request: {0}")]
    Validation(String),
}

/// Coarse classification of a `SearchError`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidRepository,
    InvalidPattern,
    InvalidPathFilter,
    History,
    Validation,
}

impl SearchError {
    /// Build an `InvalidRepository` error from a failed open
    pub fn invalid_repository(path: impl Into<String>, err: &git2::Error) -> Self {
        SearchError::InvalidRepository {
            path: path.into(),
            reason: err.message().to_string(),
        }
    }

    /// Build an `InvalidPattern` error from a regex compile failure
    pub fn invalid_pattern(pattern: impl Into<String>, err: &regex::Error) -> Self {
        SearchError::InvalidPattern {
            pattern: pattern.into(),
            reason: err.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::InvalidRepository { .. } => ErrorKind::InvalidRepository,
            SearchError::InvalidPattern { .. } => ErrorKind::InvalidPattern,
            SearchError::InvalidPathFilter { .. } => ErrorKind::InvalidPathFilter,
            SearchError::History(_) => ErrorKind::History,
            SearchError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Check if this is a user error (bad input) vs a repository failure
    pub fn is_user_error(&self) -> bool {
        !matches!(self, SearchError::History(_))
    }

    /// Convert to the text payload returned by the MCP tools
    pub fn to_user_string(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}
