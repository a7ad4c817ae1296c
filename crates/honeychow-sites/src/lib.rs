//! HoneyChow Sites - Site definition system for username probing.
//!
//! This crate provides the types and loading logic for the site database:
//! one [`SiteDefinition`] per external service, describing how to build a
//! probe request for a username and how to read the response.
//!
//! # Architecture
//!
//! - **Definition Types** ([`definition`]): Strongly-typed probe templates
//! - **Loader** ([`loader`]): JSON database loading from remote sources (with fallback) or a local file
//! - **Catalog** ([`catalog`]): Immutable, shareable view with listing queries
//! - **Errors** ([`error`]): Site-database error types
//!
//! # Example
//!
//! ```rust,no_run
//! use honeychow_sites::{DatabaseSource, SiteLoader};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = reqwest::Client::new();
//! let loader = SiteLoader::new(DatabaseSource::File("sites.json".into()));
//! let catalog = loader.load(&client).await?;
//!
//! for (category, count) in catalog.category_counts() {
//!     println!("{category}: {count}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod catalog;
pub mod definition;
pub mod error;
pub mod loader;

// Re-export commonly used types
pub use catalog::SiteCatalog;
pub use definition::{HttpMethod, SiteDefinition, ACCOUNT_PLACEHOLDER};
pub use error::{Result, SiteError};
pub use loader::{parse_database, DatabaseSource, SiteLoader};
