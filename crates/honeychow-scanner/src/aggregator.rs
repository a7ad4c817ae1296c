//! Result aggregation.
//!
//! Collects completed [`SiteResult`]s in arrival order, partitions them into
//! the found / not-found / failed buckets, and computes summary statistics.

use crate::result::{Bucket, RunningCounts, SiteResult};
use serde::Serialize;

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// Every dispatched probe completed
    Completed,
    /// The name allowlist matched no site; nothing was dispatched
    NoMatchingSites,
    /// Cancelled before all probes completed; buckets hold partial results
    Interrupted,
}

/// Final, partitioned results of one search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    /// Accounts judged to exist, highest confidence first
    pub found: Vec<SiteResult>,
    /// Accounts judged not to exist, in arrival order
    pub not_found: Vec<SiteResult>,
    /// Probes that did not complete, in arrival order
    pub failed: Vec<SiteResult>,
    /// How the search ended
    pub status: SearchStatus,
}

impl SearchResults {
    /// Three empty buckets.
    #[must_use]
    pub fn empty(status: SearchStatus) -> Self {
        Self {
            found: Vec::new(),
            not_found: Vec::new(),
            failed: Vec::new(),
            status,
        }
    }

    /// Total number of results across all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.found.len() + self.not_found.len() + self.failed.len()
    }

    /// Summary statistics over the buckets.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let found = self.found.len();
        let not_found = self.not_found.len();
        let failed = self.failed.len();
        let total = found + not_found + failed;
        let checked = total - failed;

        Summary {
            total,
            found,
            not_found,
            failed,
            checked,
            success_rate: 100 * found / checked.max(1),
            by_category: category_breakdown(&self.found),
        }
    }
}

/// Summary statistics of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// All results
    pub total: usize,
    /// Size of the found bucket
    pub found: usize,
    /// Size of the not-found bucket
    pub not_found: usize,
    /// Size of the failed bucket
    pub failed: usize,
    /// Results that received a response (`total - failed`)
    pub checked: usize,
    /// `floor(100 * found / max(1, checked))`
    pub success_rate: usize,
    /// Found results per category, most frequent first
    pub by_category: Vec<(String, usize)>,
}

/// Count found results per category; ties keep first-seen order.
fn category_breakdown(found: &[SiteResult]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for result in found {
        match counts.iter_mut().find(|(category, _)| *category == result.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((result.category.clone(), 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Sole writer of the result buckets during a search.
#[derive(Debug, Default)]
pub struct ResultAggregator {
    found: Vec<SiteResult>,
    not_found: Vec<SiteResult>,
    failed: Vec<SiteResult>,
    counts: RunningCounts,
}

impl ResultAggregator {
    /// Create an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a completed result and return the bucket it went into.
    pub fn push(&mut self, result: SiteResult) -> Bucket {
        let bucket = result.bucket();
        self.counts = self.counts.incremented(bucket);

        match bucket {
            Bucket::Found => self.found.push(result),
            Bucket::NotFound => self.not_found.push(result),
            Bucket::Failed => self.failed.push(result),
        }

        bucket
    }

    /// Bucket sizes so far.
    #[must_use]
    pub fn counts(&self) -> RunningCounts {
        self.counts
    }

    /// Finalize the buckets.
    #[must_use]
    pub fn finish(mut self, status: SearchStatus) -> SearchResults {
        // `sort_by` is stable: equal confidence keeps arrival order
        self.found.sort_by(|a, b| b.confidence.cmp(&a.confidence));

        SearchResults {
            found: self.found,
            not_found: self.not_found,
            failed: self.failed,
            status,
        }
    }
}

impl Extend<SiteResult> for ResultAggregator {
    fn extend<I: IntoIterator<Item = SiteResult>>(&mut self, iter: I) {
        for result in iter {
            self.push(result);
        }
    }
}
