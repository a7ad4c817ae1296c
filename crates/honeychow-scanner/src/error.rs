use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("no matching sites found for: {}", requested.join(", "))]
    NoMatchingSites { requested: Vec<String> },

    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),

    #[error("CSV export error: {0}")]
    Export(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single probe's network call.
///
/// Always recovered into a failed `SiteResult`; never aborts a search.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("Timeout")]
    Timeout { after: Duration },

    #[error("{0}")]
    Request(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_sites_display() {
        let err = ScanError::NoMatchingSites {
            requested: vec!["MySpace".to_string(), "Friendster".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "no matching sites found for: MySpace, Friendster"
        );
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Timeout {
            after: Duration::from_secs(15),
        };
        assert_eq!(err.to_string(), "Timeout");

        let err = TransportError::Request("connection refused".to_string());
        assert_eq!(err.to_string(), "connection refused");
    }
}
