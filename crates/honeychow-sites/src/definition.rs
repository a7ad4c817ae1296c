//! Site definition types.
//!
//! This module defines the probe template for a single external service as
//! it appears in the JSON site database.

use crate::error::{Result, SiteError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Token replaced by the (sanitized) username in URL and body templates.
pub const ACCOUNT_PLACEHOLDER: &str = "{account}";

/// Immutable probe template for one service.
///
/// Optional classification fields that are absent (or empty / zero in the
/// JSON document) mean "this rule does not apply".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDefinition {
    /// Human-readable service name
    pub name: String,

    /// Service category (e.g. "social", "coding")
    #[serde(default = "default_category", deserialize_with = "null_as_default_category")]
    pub category: String,

    /// Probe URL containing [`ACCOUNT_PLACEHOLDER`]
    #[serde(rename = "uri_check")]
    pub url_template: String,

    /// Display URL; falls back to `url_template` when absent
    #[serde(
        rename = "uri_pretty",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub pretty_url_template: Option<String>,

    /// Extra or overriding HTTP headers
    #[serde(
        default,
        alias = "header",
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub headers: BTreeMap<String, String>,

    /// Characters removed from the username before substitution
    #[serde(
        rename = "strip_bad_char",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub strip_chars: String,

    /// Request body template; its presence makes the probe a POST
    #[serde(
        rename = "post_body",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub post_body_template: Option<String>,

    /// Status code indicating the account exists
    #[serde(
        rename = "hit_code",
        default,
        deserialize_with = "zero_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub hit_status_code: Option<u16>,

    /// Body text indicating the account exists
    #[serde(
        rename = "hit_string",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub hit_substring: Option<String>,

    /// Status code indicating the account does not exist
    #[serde(
        rename = "miss_code",
        default,
        deserialize_with = "zero_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub miss_status_code: Option<u16>,

    /// Body text indicating the account does not exist
    #[serde(
        rename = "miss_string",
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub miss_substring: Option<String>,
}

impl SiteDefinition {
    /// Create a GET definition with no classification rules configured.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        url_template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            url_template: url_template.into(),
            pretty_url_template: None,
            headers: BTreeMap::new(),
            strip_chars: String::new(),
            post_body_template: None,
            hit_status_code: None,
            hit_substring: None,
            miss_status_code: None,
            miss_substring: None,
        }
    }

    /// HTTP method used to probe this site.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        if self.post_body_template.is_some() {
            HttpMethod::Post
        } else {
            HttpMethod::Get
        }
    }

    /// Validate the definition for completeness.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SiteError::ValidationError {
                site: "<unnamed>".to_string(),
                reason: "site name cannot be empty".to_string(),
            });
        }

        if self.url_template.is_empty() {
            return Err(SiteError::ValidationError {
                site: self.name.clone(),
                reason: "uri_check cannot be empty".to_string(),
            });
        }

        // POST APIs may carry the username only in the body
        let in_url = self.url_template.contains(ACCOUNT_PLACEHOLDER);
        let in_body = self
            .post_body_template
            .as_deref()
            .is_some_and(|body| body.contains(ACCOUNT_PLACEHOLDER));

        if !in_url && !in_body {
            return Err(SiteError::ValidationError {
                site: self.name.clone(),
                reason: format!("no {ACCOUNT_PLACEHOLDER} placeholder in uri_check or post_body"),
            });
        }

        Ok(())
    }
}

/// HTTP method of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Plain GET without a body
    Get,
    /// POST with the rendered body template
    Post,
}

impl HttpMethod {
    /// Method name as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_category() -> String {
    "unknown".to_string()
}

fn null_as_default_category<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_category))
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

fn zero_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u16>::deserialize(deserializer)?.filter(|code| *code != 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_entry() {
        let json = r#"{
            "name": "GitHub",
            "category": "coding",
            "uri_check": "https://api.github.com/users/{account}",
            "uri_pretty": "https://github.com/{account}",
            "headers": {"Accept": "application/json"},
            "strip_bad_char": ".",
            "hit_code": 200,
            "hit_string": "\"login\":",
            "miss_code": 404,
            "miss_string": "Not Found",
            "known": ["octocat"]
        }"#;

        let site: SiteDefinition = serde_json::from_str(json).expect("parse site");
        assert_eq!(site.name, "GitHub");
        assert_eq!(site.category, "coding");
        assert_eq!(site.url_template, "https://api.github.com/users/{account}");
        assert_eq!(
            site.pretty_url_template.as_deref(),
            Some("https://github.com/{account}")
        );
        assert_eq!(site.headers["Accept"], "application/json");
        assert_eq!(site.strip_chars, ".");
        assert_eq!(site.hit_status_code, Some(200));
        assert_eq!(site.hit_substring.as_deref(), Some("\"login\":"));
        assert_eq!(site.miss_status_code, Some(404));
        assert_eq!(site.miss_substring.as_deref(), Some("Not Found"));
        assert_eq!(site.method(), HttpMethod::Get);
        assert!(site.validate().is_ok());
    }

    #[test]
    fn test_empty_and_null_fields_are_absent() {
        let json = r#"{
            "name": "Sparse",
            "category": null,
            "uri_check": "https://sparse.example/{account}",
            "uri_pretty": "",
            "header": null,
            "strip_bad_char": null,
            "post_body": "",
            "hit_code": 0,
            "hit_string": "",
            "miss_code": null,
            "miss_string": ""
        }"#;

        let site: SiteDefinition = serde_json::from_str(json).expect("parse site");
        assert_eq!(site.category, "unknown");
        assert!(site.pretty_url_template.is_none());
        assert!(site.headers.is_empty());
        assert!(site.strip_chars.is_empty());
        assert!(site.post_body_template.is_none());
        assert!(site.hit_status_code.is_none());
        assert!(site.hit_substring.is_none());
        assert!(site.miss_status_code.is_none());
        assert!(site.miss_substring.is_none());
    }

    #[test]
    fn test_header_alias_and_post_method() {
        let json = r#"{
            "name": "Api",
            "uri_check": "https://api.example/lookup",
            "header": {"Content-Type": "application/json"},
            "post_body": "{\"user\":\"{account}\"}"
        }"#;

        let site: SiteDefinition = serde_json::from_str(json).expect("parse site");
        assert_eq!(site.category, "unknown");
        assert_eq!(site.headers["Content-Type"], "application/json");
        assert_eq!(site.method(), HttpMethod::Post);
        // Placeholder only in the body is accepted
        assert!(site.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_placeholder() {
        let site = SiteDefinition::new("Static", "misc", "https://static.example/profile");
        let err = site.validate().unwrap_err();
        assert!(matches!(err, SiteError::ValidationError { .. }));
        assert!(err.to_string().contains("{account}"));
    }

    #[test]
    fn test_validate_empty_name() {
        let site = SiteDefinition::new("  ", "misc", "https://example.com/{account}");
        assert!(site.validate().is_err());
    }

    #[test]
    fn test_serialize_uses_database_keys() {
        let mut site = SiteDefinition::new("Example", "social", "https://example.com/{account}");
        site.hit_status_code = Some(200);

        let value = serde_json::to_value(&site).expect("serialize site");
        assert_eq!(value["uri_check"], "https://example.com/{account}");
        assert_eq!(value["hit_code"], 200);
        assert!(value.get("miss_string").is_none());
        assert!(value.get("headers").is_none());
    }

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
    }
}
