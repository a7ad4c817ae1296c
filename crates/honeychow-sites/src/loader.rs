//! Site database loading.
//!
//! The database is a JSON document of the form `{"sites": [...]}`. It is
//! fetched from a list of remote sources (first success wins) or read from a
//! local file. Entries that fail to parse or validate are skipped.

use crate::{
    catalog::SiteCatalog,
    definition::SiteDefinition,
    error::{Result, SiteError},
};
use honeychow_core::DatabaseConfig;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

/// Where the site database comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseSource {
    /// Remote URLs, tried in order
    Remote(Vec<String>),
    /// Local JSON file
    File(PathBuf),
}

impl DatabaseSource {
    /// Pick the source described by the configuration; a local path wins.
    #[must_use]
    pub fn from_config(config: &DatabaseConfig) -> Self {
        match &config.path {
            Some(path) => Self::File(path.clone()),
            None => Self::Remote(config.sources.clone()),
        }
    }
}

#[derive(Deserialize)]
struct DatabaseDocument {
    #[serde(default)]
    sites: Vec<serde_json::Value>,
}

/// Loader for the site database.
pub struct SiteLoader {
    source: DatabaseSource,
}

impl SiteLoader {
    /// Create a loader for the given source.
    #[must_use]
    pub fn new(source: DatabaseSource) -> Self {
        Self { source }
    }

    /// Create a loader from the `[database]` configuration section.
    #[must_use]
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(DatabaseSource::from_config(config))
    }

    /// The source this loader reads from.
    #[must_use]
    pub fn source(&self) -> &DatabaseSource {
        &self.source
    }

    /// Load the catalog from the configured source.
    ///
    /// # Errors
    /// Returns [`SiteError::DatabaseUnavailable`] if every remote source fails,
    /// or a load/parse error for a local file.
    pub async fn load(&self, client: &Client) -> Result<SiteCatalog> {
        match &self.source {
            DatabaseSource::Remote(sources) => Self::load_remote(client, sources).await,
            DatabaseSource::File(path) => Self::load_file(path),
        }
    }

    /// Load the catalog from a local JSON file.
    pub fn load_file(path: &Path) -> Result<SiteCatalog> {
        let origin = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| SiteError::LoadError {
            path: origin.clone(),
            source,
        })?;

        let sites = parse_database(&contents, &origin)?;

        info!(count = sites.len(), path = %origin, "loaded site database");

        Ok(SiteCatalog::new(sites, origin))
    }

    /// Fetch the catalog from the first remote source that answers.
    ///
    /// Sources are tried in order; a non-200 answer, a network error, or an
    /// unparseable document moves on to the next source.
    pub async fn load_remote(client: &Client, sources: &[String]) -> Result<SiteCatalog> {
        for url in sources {
            let domain = display_domain(url);
            debug!(source = %domain, "fetching site database");

            match Self::fetch_source(client, url).await {
                Ok(sites) => {
                    info!(count = sites.len(), source = %domain, "loaded site database");
                    return Ok(SiteCatalog::new(sites, domain));
                }
                Err(e) => {
                    warn!(source = %domain, error = %e, "failed to fetch site database");
                }
            }
        }

        Err(SiteError::DatabaseUnavailable {
            attempted: sources.len(),
        })
    }

    /// Fetch and parse a single remote source.
    async fn fetch_source(client: &Client, url: &str) -> Result<Vec<SiteDefinition>> {
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|source| SiteError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SiteError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| SiteError::Fetch {
            url: url.to_string(),
            source,
        })?;

        parse_database(&body, url)
    }
}

/// Parse a database document, skipping entries that are malformed or invalid.
///
/// A document without a `sites` key yields an empty list.
///
/// # Errors
/// Returns [`SiteError::ParseError`] if the document itself is not valid JSON.
pub fn parse_database(contents: &str, origin: &str) -> Result<Vec<SiteDefinition>> {
    let document: DatabaseDocument =
        serde_json::from_str(contents).map_err(|source| SiteError::ParseError {
            origin: origin.to_string(),
            source,
        })?;

    let mut sites = Vec::with_capacity(document.sites.len());

    for (index, entry) in document.sites.into_iter().enumerate() {
        let site = match serde_json::from_value::<SiteDefinition>(entry) {
            Ok(site) => site,
            Err(e) => {
                warn!(index, error = %e, "skipping malformed site definition");
                continue;
            }
        };

        if let Err(e) = site.validate() {
            warn!(index, error = %e, "skipping invalid site definition");
            continue;
        }

        sites.push(site);
    }

    Ok(sites)
}

/// Host part of a URL for log and status lines; the raw string if unparseable.
fn display_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}
