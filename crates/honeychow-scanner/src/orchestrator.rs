//! Probe orchestrator for username searches.
//!
//! This module provides the `ProbeOrchestrator` which filters the site list,
//! dispatches one probe per remaining site under a concurrency ceiling,
//! classifies each response, and hands results to the aggregator in
//! completion order.

use crate::aggregator::{ResultAggregator, SearchResults, SearchStatus};
use crate::classifier::classify;
use crate::error::TransportError;
use crate::filter::SiteFilter;
use crate::report::ProgressReporter;
use crate::request::{build_pretty_url, Headers, ProbeRequest};
use crate::result::SiteResult;
use crate::transport::Transport;
use futures::stream::{FuturesUnordered, StreamExt};
use honeychow_core::SearchConfig;
use honeychow_sites::SiteDefinition;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Default ceiling on probes awaiting the network at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 100;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Orchestrates one probe per site for a username.
pub struct ProbeOrchestrator {
    /// Transport used for every probe
    transport: Arc<dyn Transport>,
    /// Maximum probes awaiting their network call at once
    max_concurrency: usize,
    /// Per-request timeout
    timeout: Duration,
    /// Baseline headers, overridden per site
    default_headers: Headers,
}

impl ProbeOrchestrator {
    /// Create an orchestrator with default limits and headers.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            default_headers: SearchConfig::default().default_headers(),
        }
    }

    /// Create an orchestrator from the `[search]` configuration section.
    #[must_use]
    pub fn from_config(transport: Arc<dyn Transport>, config: &SearchConfig) -> Self {
        Self::new(transport)
            .with_max_concurrency(config.workers)
            .with_timeout(Duration::from_secs(config.timeout_secs))
            .with_default_headers(config.default_headers())
    }

    /// Set the concurrency ceiling, clamped to `1..=Semaphore::MAX_PERMITS`.
    #[must_use]
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.clamp(1, Semaphore::MAX_PERMITS);
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the baseline headers.
    #[must_use]
    pub fn with_default_headers(mut self, headers: Headers) -> Self {
        self.default_headers = headers;
        self
    }

    /// The concurrency ceiling.
    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// The per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Search for `username` across the sites selected by `filter`.
    ///
    /// Never fails: probe failures land in the failed bucket, an unmatched
    /// name allowlist ends with [`SearchStatus::NoMatchingSites`] and no
    /// probes dispatched, and cancellation ends with
    /// [`SearchStatus::Interrupted`] holding the results completed so far.
    pub async fn search(
        &self,
        sites: &[SiteDefinition],
        username: &str,
        filter: &SiteFilter,
        reporter: &mut dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> SearchResults {
        let selected = match filter.apply(sites) {
            Ok(selected) => selected,
            Err(e) => {
                warn!(error = %e, "search aborted");
                reporter.on_no_match(&filter.names);
                let results = SearchResults::empty(SearchStatus::NoMatchingSites);
                reporter.on_finish(&results);
                return results;
            }
        };

        let total = selected.len();
        info!(
            username,
            sites = total,
            max_concurrency = self.max_concurrency,
            "starting search"
        );
        reporter.on_start(username, total);

        let semaphore = Semaphore::new(self.max_concurrency);
        let mut pending: FuturesUnordered<_> = selected
            .into_iter()
            .map(|site| self.probe(site, username, &semaphore))
            .collect();

        let mut aggregator = ResultAggregator::new();
        let mut status = SearchStatus::Completed;

        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => {
                    warn!(
                        completed = aggregator.counts().completed(),
                        total,
                        "search interrupted"
                    );
                    status = SearchStatus::Interrupted;
                    break;
                }
                next = pending.next() => {
                    let Some(result) = next else { break };

                    let bucket = result.bucket();
                    reporter.on_result(&result, bucket, aggregator.counts().incremented(bucket));
                    aggregator.push(result);
                }
            }
        }

        // Abandon whatever is still in flight
        drop(pending);

        let results = aggregator.finish(status);
        info!(
            username,
            found = results.found.len(),
            not_found = results.not_found.len(),
            failed = results.failed.len(),
            "search finished"
        );
        reporter.on_finish(&results);

        results
    }

    /// Probe a single site. Only the network call holds a permit.
    async fn probe(
        &self,
        site: &SiteDefinition,
        username: &str,
        semaphore: &Semaphore,
    ) -> SiteResult {
        let request = ProbeRequest::build(site, username, &self.default_headers);
        let url = build_pretty_url(site, username);

        let response = {
            // Never closed, so acquiring cannot fail.
            let _permit = semaphore.acquire().await.ok();

            debug!(site = %site.name, method = %request.method, url = %request.url, "dispatching probe");

            tokio::time::timeout(self.timeout, self.transport.execute(&request, self.timeout))
                .await
                .unwrap_or(Err(TransportError::Timeout {
                    after: self.timeout,
                }))
        };

        match response {
            Ok(response) => {
                let classification = classify(site, response.status_code, &response.body);
                debug!(
                    site = %site.name,
                    status_code = response.status_code,
                    exists = classification.exists,
                    confidence = classification.confidence,
                    "probe classified"
                );

                SiteResult::classified(
                    &site.name,
                    &site.category,
                    url,
                    response.status_code,
                    classification,
                )
            }
            Err(e) => {
                debug!(site = %site.name, error = %e, "probe failed");
                SiteResult::failed(&site.name, &site.category, url, &e.to_string())
            }
        }
    }
}
