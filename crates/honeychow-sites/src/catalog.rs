//! Immutable, shareable view of the loaded site database.

use crate::definition::SiteDefinition;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Loaded site definitions plus a label describing where they came from.
///
/// The definitions are read-only for the lifetime of a search, so the
/// catalog shares them behind an `Arc` without any locking.
#[derive(Debug, Clone)]
pub struct SiteCatalog {
    /// Site definitions in database order
    sites: Arc<[SiteDefinition]>,
    /// Domain or file path the database was loaded from
    origin: String,
}

impl SiteCatalog {
    /// Create a catalog from already-validated definitions.
    #[must_use]
    pub fn new(sites: Vec<SiteDefinition>, origin: impl Into<String>) -> Self {
        Self {
            sites: sites.into(),
            origin: origin.into(),
        }
    }

    /// All definitions, in database order.
    #[must_use]
    pub fn sites(&self) -> &[SiteDefinition] {
        &self.sites
    }

    /// Where the database was loaded from.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the catalog holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Definitions sorted by name, ignoring case.
    #[must_use]
    pub fn sorted_by_name(&self) -> Vec<&SiteDefinition> {
        let mut sites: Vec<&SiteDefinition> = self.sites.iter().collect();
        sites.sort_by_cached_key(|site| site.name.to_lowercase());
        sites
    }

    /// Number of sites per category, ordered by category name.
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();

        for site in self.sites.iter() {
            *counts.entry(site.category.clone()).or_insert(0) += 1;
        }

        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_catalog() -> SiteCatalog {
        SiteCatalog::new(
            vec![
                SiteDefinition::new("gitlab", "coding", "https://gitlab.com/{account}"),
                SiteDefinition::new("Reddit", "social", "https://reddit.com/user/{account}"),
                SiteDefinition::new("GitHub", "coding", "https://github.com/{account}"),
                SiteDefinition::new("Mastodon", "social", "https://mastodon.social/@{account}"),
                SiteDefinition::new("Chess", "gaming", "https://chess.com/member/{account}"),
            ],
            "test",
        )
    }

    #[test]
    fn test_catalog_len() {
        let catalog = create_test_catalog();
        assert_eq!(catalog.len(), 5);
        assert!(!catalog.is_empty());
        assert!(SiteCatalog::new(Vec::new(), "empty").is_empty());
    }

    #[test]
    fn test_catalog_sorted_by_name() {
        let catalog = create_test_catalog();
        let names: Vec<&str> = catalog
            .sorted_by_name()
            .into_iter()
            .map(|site| site.name.as_str())
            .collect();
        assert_eq!(names, vec!["Chess", "GitHub", "gitlab", "Mastodon", "Reddit"]);
    }

    #[test]
    fn test_catalog_category_counts() {
        let catalog = create_test_catalog();
        let counts: Vec<(String, usize)> = catalog.category_counts().into_iter().collect();
        assert_eq!(
            counts,
            vec![
                ("coding".to_string(), 2),
                ("gaming".to_string(), 1),
                ("social".to_string(), 2),
            ]
        );
    }
}
