//! Per-probe results and the buckets they are sorted into.

use crate::classifier::Classification;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length, in characters, of an error description kept on a result.
pub const MAX_ERROR_CHARS: usize = 50;

/// Outcome of probing one site.
///
/// Created exactly once per dispatched probe and never modified afterwards.
/// A `status_code` of 0 means no response was received; such results always
/// carry an `error` and never claim the account exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteResult {
    /// Site name from the definition
    pub site_name: String,
    /// Site category from the definition
    pub category: String,
    /// Resolved display URL
    pub url: String,
    /// Whether the account is judged to exist
    pub exists: bool,
    /// HTTP status code, or 0 when no response was received
    pub status_code: u16,
    /// Heuristic certainty, 0-100
    pub confidence: u8,
    /// Failure description when the probe did not complete
    pub error: Option<String>,
}

impl SiteResult {
    /// Result of a probe that received a response.
    #[must_use]
    pub fn classified(
        site_name: impl Into<String>,
        category: impl Into<String>,
        url: impl Into<String>,
        status_code: u16,
        classification: Classification,
    ) -> Self {
        Self {
            site_name: site_name.into(),
            category: category.into(),
            url: url.into(),
            exists: classification.exists,
            status_code,
            confidence: classification.confidence,
            error: None,
        }
    }

    /// Result of a probe whose network call failed.
    #[must_use]
    pub fn failed(
        site_name: impl Into<String>,
        category: impl Into<String>,
        url: impl Into<String>,
        error: &str,
    ) -> Self {
        Self {
            site_name: site_name.into(),
            category: category.into(),
            url: url.into(),
            exists: false,
            status_code: 0,
            confidence: 0,
            error: Some(truncate_error(error)),
        }
    }

    /// Bucket this result belongs in.
    #[must_use]
    pub fn bucket(&self) -> Bucket {
        Bucket::of(self)
    }
}

/// Keep at most [`MAX_ERROR_CHARS`] characters of an error description.
#[must_use]
pub fn truncate_error(error: &str) -> String {
    let truncated: String = error.chars().take(MAX_ERROR_CHARS).collect();
    if truncated.is_empty() {
        "Unknown error".to_string()
    } else {
        truncated
    }
}

/// One of the three disjoint outcome sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Account judged to exist
    Found,
    /// Account judged not to exist
    NotFound,
    /// Probe did not complete
    Failed,
}

impl Bucket {
    /// An error wins over `exists`; otherwise `exists` decides.
    #[must_use]
    pub fn of(result: &SiteResult) -> Self {
        if result.error.as_deref().is_some_and(|e| !e.is_empty()) {
            Self::Failed
        } else if result.exists {
            Self::Found
        } else {
            Self::NotFound
        }
    }

    /// Lowercase name used in exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::NotFound => "not_found",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket sizes at a point during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunningCounts {
    /// Results in the found bucket
    pub found: usize,
    /// Results in the not-found bucket
    pub not_found: usize,
    /// Results in the failed bucket
    pub failed: usize,
}

impl RunningCounts {
    /// Counts with one more result in `bucket`.
    #[must_use]
    pub fn incremented(mut self, bucket: Bucket) -> Self {
        match bucket {
            Bucket::Found => self.found += 1,
            Bucket::NotFound => self.not_found += 1,
            Bucket::Failed => self.failed += 1,
        }
        self
    }

    /// Results seen so far.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.found + self.not_found + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classification(exists: bool, confidence: u8) -> Classification {
        Classification { exists, confidence }
    }

    #[test]
    fn test_failed_result_invariants() {
        let result = SiteResult::failed("Example", "social", "https://example.com/x", "Timeout");
        assert_eq!(result.status_code, 0);
        assert!(!result.exists);
        assert_eq!(result.confidence, 0);
        assert_eq!(result.error.as_deref(), Some("Timeout"));
        assert_eq!(result.bucket(), Bucket::Failed);
    }

    #[test]
    fn test_truncate_error() {
        let long = "error sending request for url (https://example.com/some/very/long/path)";
        let truncated = truncate_error(long);
        assert_eq!(truncated.chars().count(), MAX_ERROR_CHARS);
        assert!(long.starts_with(&truncated));

        // Multi-byte characters are never split
        let accented = "é".repeat(80);
        assert_eq!(truncate_error(&accented).chars().count(), MAX_ERROR_CHARS);

        assert_eq!(truncate_error(""), "Unknown error");
    }

    #[test]
    fn test_bucket_precedence() {
        let found = SiteResult::classified("A", "c", "u", 200, classification(true, 70));
        assert_eq!(Bucket::of(&found), Bucket::Found);

        let not_found = SiteResult::classified("A", "c", "u", 404, classification(false, 80));
        assert_eq!(Bucket::of(&not_found), Bucket::NotFound);

        // Error wins even when exists is set
        let mut odd = found.clone();
        odd.error = Some("boom".to_string());
        assert_eq!(Bucket::of(&odd), Bucket::Failed);

        // An empty error string is not an error
        let mut empty_error = found;
        empty_error.error = Some(String::new());
        assert_eq!(Bucket::of(&empty_error), Bucket::Found);
    }

    #[test]
    fn test_running_counts() {
        let counts = RunningCounts::default()
            .incremented(Bucket::Found)
            .incremented(Bucket::Failed)
            .incremented(Bucket::Failed);
        assert_eq!(counts.found, 1);
        assert_eq!(counts.not_found, 0);
        assert_eq!(counts.failed, 2);
        assert_eq!(counts.completed(), 3);
    }

    #[test]
    fn test_bucket_display() {
        assert_eq!(Bucket::NotFound.to_string(), "not_found");
        assert_eq!(Bucket::Found.as_str(), "found");
    }
}
