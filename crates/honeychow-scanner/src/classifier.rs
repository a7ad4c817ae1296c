//! Existence classification for probe responses.
//!
//! A priority-ordered decision table over the site's configured signals; the
//! first applicable rule wins. Absent signals make a rule inapplicable.

use honeychow_sites::SiteDefinition;

/// Miss text found in the body.
pub const MISS_SUBSTRING_CONFIDENCE: u8 = 100;
/// Miss status matched and no hit text configured.
pub const MISS_STATUS_CONFIDENCE: u8 = 90;
/// Hit status and hit text both matched.
pub const HIT_STATUS_AND_SUBSTRING_CONFIDENCE: u8 = 100;
/// Hit status matched but the configured hit text is missing.
pub const HIT_STATUS_WITHOUT_SUBSTRING_CONFIDENCE: u8 = 80;
/// Hit status matched, no hit text configured.
pub const HIT_STATUS_ONLY_CONFIDENCE: u8 = 70;
/// Hit status differs but the hit text is present.
pub const HIT_SUBSTRING_ONLY_CONFIDENCE: u8 = 60;
/// Hit status differs and no hit text to fall back on.
pub const HIT_STATUS_MISMATCH_CONFIDENCE: u8 = 80;
/// No applicable signal.
pub const DEFAULT_CONFIDENCE: u8 = 50;

/// Outcome of classifying one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Whether the account is judged to exist
    pub exists: bool,
    /// Heuristic certainty, 0-100
    pub confidence: u8,
}

impl Classification {
    const fn found(confidence: u8) -> Self {
        Self {
            exists: true,
            confidence,
        }
    }

    const fn missing(confidence: u8) -> Self {
        Self {
            exists: false,
            confidence,
        }
    }
}

/// Classify a response for `site`.
#[must_use]
pub fn classify(site: &SiteDefinition, status_code: u16, body: &str) -> Classification {
    let hit_substring = configured(site.hit_substring.as_deref());

    if let Some(miss) = configured(site.miss_substring.as_deref()) {
        if body.contains(miss) {
            return Classification::missing(MISS_SUBSTRING_CONFIDENCE);
        }
    }

    if site.miss_status_code == Some(status_code) && hit_substring.is_none() {
        return Classification::missing(MISS_STATUS_CONFIDENCE);
    }

    match (site.hit_status_code, hit_substring) {
        (Some(hit), Some(text)) if hit == status_code => {
            if body.contains(text) {
                Classification::found(HIT_STATUS_AND_SUBSTRING_CONFIDENCE)
            } else {
                Classification::missing(HIT_STATUS_WITHOUT_SUBSTRING_CONFIDENCE)
            }
        }
        (Some(hit), None) if hit == status_code => {
            Classification::found(HIT_STATUS_ONLY_CONFIDENCE)
        }
        (Some(_), Some(text)) if body.contains(text) => {
            Classification::found(HIT_SUBSTRING_ONLY_CONFIDENCE)
        }
        (Some(_), _) => Classification::missing(HIT_STATUS_MISMATCH_CONFIDENCE),
        (None, _) => Classification::missing(DEFAULT_CONFIDENCE),
    }
}

/// Empty text is never a signal.
fn configured(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
