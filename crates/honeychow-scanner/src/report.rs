//! Progress reporting.
//!
//! Reporters observe a search as it runs. They cannot influence
//! classification or aggregation.

use crate::aggregator::SearchResults;
use crate::result::{Bucket, RunningCounts, SiteResult};
use tracing::{debug, info, warn};

/// Observer notified as a search progresses.
///
/// Every method has a no-op default.
pub trait ProgressReporter: Send {
    /// Probes are about to be dispatched to `total` sites.
    fn on_start(&mut self, _username: &str, _total: usize) {}

    /// A probe completed and was placed in `bucket`.
    fn on_result(&mut self, _result: &SiteResult, _bucket: Bucket, _counts: RunningCounts) {}

    /// The name allowlist matched no site.
    fn on_no_match(&mut self, _requested: &[String]) {}

    /// The search ended and the buckets are final.
    fn on_finish(&mut self, _results: &SearchResults) {}
}

/// Reporter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {}

/// Reporter that emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn on_start(&mut self, username: &str, total: usize) {
        info!(username, sites = total, "search started");
    }

    fn on_result(&mut self, result: &SiteResult, bucket: Bucket, counts: RunningCounts) {
        debug!(
            site = %result.site_name,
            %bucket,
            completed = counts.completed(),
            "probe completed"
        );
    }

    fn on_no_match(&mut self, requested: &[String]) {
        warn!(requested = ?requested, "no matching sites");
    }

    fn on_finish(&mut self, results: &SearchResults) {
        let summary = results.summary();
        info!(
            status = ?results.status,
            found = summary.found,
            not_found = summary.not_found,
            failed = summary.failed,
            "search finished"
        );
    }
}
