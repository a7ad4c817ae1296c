//! HoneyChow Scanner - username probing and classification.
//!
//! This crate checks whether a username is registered on many independent
//! services. It builds one HTTP probe per site definition, dispatches the
//! probes under a concurrency ceiling, classifies each response with the
//! site's heuristics, and aggregates the outcomes into found, not-found and
//! failed buckets.
//!
//! # Features
//!
//! - Bounded concurrent fan-out with completion-order fan-in
//! - Priority-ordered existence classification with confidence scores
//! - Per-probe failure isolation (timeouts and transport errors never abort a search)
//! - Cooperative cancellation that keeps completed results
//! - CSV export
//!
//! # Example
//!
//! ```rust,ignore
//! use honeychow_scanner::{HttpTransport, NoopReporter, ProbeOrchestrator, SiteFilter};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! let orchestrator = ProbeOrchestrator::new(Arc::new(HttpTransport::new()?))
//!     .with_max_concurrency(50);
//!
//! let results = orchestrator
//!     .search(
//!         catalog.sites(),
//!         "alice",
//!         &SiteFilter::all().with_categories(["coding"]),
//!         &mut NoopReporter,
//!         &CancellationToken::new(),
//!     )
//!     .await;
//!
//! println!("{}% success", results.summary().success_rate);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod aggregator;
pub mod classifier;
#[allow(missing_docs)]
pub mod error;
pub mod export;
#[allow(missing_docs)]
pub mod filter;
pub mod orchestrator;
pub mod report;
#[allow(missing_docs)]
pub mod request;
pub mod result;
pub mod transport;

// Re-export commonly used types
pub use aggregator::{ResultAggregator, SearchResults, SearchStatus, Summary};
pub use classifier::{classify, Classification};
pub use error::{Result, ScanError, TransportError};
pub use export::{export_csv_file, write_csv};
pub use filter::SiteFilter;
pub use orchestrator::{ProbeOrchestrator, DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT};
pub use report::{NoopReporter, ProgressReporter, TracingReporter};
pub use request::{Headers, ProbeRequest};
pub use result::{Bucket, RunningCounts, SiteResult};
pub use transport::{HttpTransport, ProbeResponse, Transport};
