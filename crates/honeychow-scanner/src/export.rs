//! CSV export of search results.

use crate::aggregator::SearchResults;
use crate::error::Result;
use crate::result::{Bucket, SiteResult};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct ExportRow<'a> {
    site_name: &'a str,
    category: &'a str,
    url: &'a str,
    status: Bucket,
    status_code: u16,
    confidence: u8,
    error: &'a str,
}

impl<'a> ExportRow<'a> {
    fn new(result: &'a SiteResult, status: Bucket) -> Self {
        Self {
            site_name: &result.site_name,
            category: &result.category,
            url: &result.url,
            status,
            status_code: result.status_code,
            confidence: result.confidence,
            error: result.error.as_deref().unwrap_or_default(),
        }
    }
}

/// Write results as CSV, returning the number of data rows written.
///
/// Found rows are always written; not-found and failed rows only when
/// `include_all` is set.
///
/// # Errors
/// Returns error if a row cannot be written.
pub fn write_csv<W: Write>(writer: W, results: &SearchResults, include_all: bool) -> Result<usize> {
    // Header written by hand so an empty export still has one
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    let mut rows = 0;

    csv.write_record([
        "site_name",
        "category",
        "url",
        "status",
        "status_code",
        "confidence",
        "error",
    ])?;

    let mut buckets = vec![(Bucket::Found, &results.found)];
    if include_all {
        buckets.push((Bucket::NotFound, &results.not_found));
        buckets.push((Bucket::Failed, &results.failed));
    }

    for (bucket, bucket_results) in buckets {
        for result in bucket_results {
            csv.serialize(ExportRow::new(result, bucket))?;
            rows += 1;
        }
    }

    csv.flush()?;
    Ok(rows)
}

/// Write results to a CSV file at `path`, replacing it if present.
///
/// # Errors
/// Returns error if the file cannot be created or written.
pub fn export_csv_file(path: &Path, results: &SearchResults, include_all: bool) -> Result<usize> {
    let file = File::create(path)?;
    let rows = write_csv(file, results, include_all)?;

    info!(path = %path.display(), rows, "exported results");
    Ok(rows)
}
