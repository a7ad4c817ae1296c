use honeychow_sites::{HttpMethod, SiteDefinition, ACCOUNT_PLACEHOLDER};
use std::collections::BTreeMap;

/// Header name to value; names compare case-insensitively when merged.
pub type Headers = BTreeMap<String, String>;

/// A concrete probe request for one site and username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
}

impl ProbeRequest {
    pub fn build(site: &SiteDefinition, username: &str, defaults: &Headers) -> Self {
        Self {
            method: site.method(),
            url: build_url(site, username),
            headers: build_headers(site, defaults),
            body: build_body(site, username),
        }
    }
}

pub fn sanitize(username: &str, strip_chars: &str) -> String {
    username
        .chars()
        .filter(|c| !strip_chars.contains(*c))
        .collect()
}

fn substitute(template: &str, site: &SiteDefinition, username: &str) -> String {
    template.replace(ACCOUNT_PLACEHOLDER, &sanitize(username, &site.strip_chars))
}

pub fn build_url(site: &SiteDefinition, username: &str) -> String {
    substitute(&site.url_template, site, username)
}

pub fn build_pretty_url(site: &SiteDefinition, username: &str) -> String {
    let template = site
        .pretty_url_template
        .as_deref()
        .unwrap_or(&site.url_template);
    substitute(template, site, username)
}

/// Baseline headers overlaid with the site's own; a site header replaces any
/// baseline header with the same name regardless of case.
pub fn build_headers(site: &SiteDefinition, defaults: &Headers) -> Headers {
    let mut headers = defaults.clone();

    for (name, value) in &site.headers {
        headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
        headers.insert(name.clone(), value.clone());
    }

    headers
}

pub fn build_body(site: &SiteDefinition, username: &str) -> Option<String> {
    site.post_body_template
        .as_deref()
        .map(|template| substitute(template, site, username))
}
