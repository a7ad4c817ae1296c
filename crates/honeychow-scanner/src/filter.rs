#![allow(clippy::must_use_candidate)]

use crate::error::{Result, ScanError};
use honeychow_sites::SiteDefinition;
use serde::{Deserialize, Serialize};

/// Optional case-insensitive allowlists restricting which sites are probed.
///
/// An empty list means "no restriction". When both lists are set a site must
/// satisfy both.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteFilter {
    pub names: Vec<String>,
    pub categories: Vec<String>,
}

impl SiteFilter {
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Select the sites to probe, preserving database order.
    ///
    /// # Errors
    /// Returns [`ScanError::NoMatchingSites`] when a non-empty name allowlist
    /// matches nothing. An unmatched category allowlist is not an error.
    pub fn apply<'a>(&self, sites: &'a [SiteDefinition]) -> Result<Vec<&'a SiteDefinition>> {
        let by_name: Vec<&SiteDefinition> = sites
            .iter()
            .filter(|site| contains_ignore_case(&self.names, &site.name))
            .collect();

        if !self.names.is_empty() && by_name.is_empty() {
            return Err(ScanError::NoMatchingSites {
                requested: self.names.clone(),
            });
        }

        Ok(by_name
            .into_iter()
            .filter(|site| contains_ignore_case(&self.categories, &site.category))
            .collect())
    }
}

/// An empty allowlist admits everything.
fn contains_ignore_case(allowlist: &[String], value: &str) -> bool {
    if allowlist.is_empty() {
        return true;
    }
    let value = value.to_lowercase();
    allowlist.iter().any(|item| item.to_lowercase() == value)
}
