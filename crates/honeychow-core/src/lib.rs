//! HoneyChow Core - Foundation crate for the HoneyChow username enumerator.
//!
//! This crate provides the configuration layer and its error types that the
//! site database, scanner, and command-line crates build on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//!
//! # Example
//!
//! ```rust
//! use honeychow_core::AppConfig;
//!
//! let config = AppConfig::default();
//! assert_eq!(config.search.workers, 100);
//! assert_eq!(config.search.timeout_secs, 15);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{AppConfig, DatabaseConfig, OutputConfig, SearchConfig, DEFAULT_DATABASE_SOURCE};
pub use error::{ConfigError, ConfigResult};
