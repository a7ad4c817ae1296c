//! Error types for the site database subsystem.

use thiserror::Error;

/// Errors that can occur while loading or validating site definitions.
#[derive(Error, Debug)]
pub enum SiteError {
    /// Failed to read the database file
    #[error("failed to load site database from {path}: {source}")]
    LoadError {
        /// Path to the database file
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the database JSON
    #[error("failed to parse site database from {origin}: {source}")]
    ParseError {
        /// File path or URL the document came from
        origin: String,
        /// JSON parse error
        #[source]
        source: serde_json::Error,
    },

    /// Invalid site definition (validation failed)
    #[error("invalid site definition for {site}: {reason}")]
    ValidationError {
        /// Name of the site being validated
        site: String,
        /// Reason for validation failure
        reason: String,
    },

    /// Network failure while fetching a remote database
    #[error("failed to fetch site database from {url}: {source}")]
    Fetch {
        /// Source URL
        url: String,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// Remote database answered with a non-success status
    #[error("site database at {url} answered HTTP {status}")]
    HttpStatus {
        /// Source URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Every configured database source failed
    #[error("site database unavailable: all {attempted} source(s) failed")]
    DatabaseUnavailable {
        /// Number of sources tried
        attempted: usize,
    },
}

/// Result type for site database operations.
pub type Result<T> = std::result::Result<T, SiteError>;
