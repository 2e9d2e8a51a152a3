//! Slug Name Deriver — turns the `/in/<slug>` fragment of a profile URL into a
//! display name without touching the network.

use std::sync::LazyLock;

use regex::Regex;

/// Returned whenever no usable name can be recovered from the URL.
pub const FALLBACK_NAME: &str = "Professional";

/// Professional suffixes that are never part of a display name.
const SUFFIX_DENYLIST: &[&str] = &["jr", "sr", "phd", "mba", "md", "ceo", "cto", "cfo"];

static PROFILE_SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"linkedin\.com/in/([a-zA-Z0-9_-]+)").expect("profile slug regex is valid")
});

/// Opaque platform identifier appended to many slugs, e.g. `-a1b2c3d4`.
static OPAQUE_ID_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-[0-9a-f]{8,}$").expect("opaque id suffix regex is valid"));

static SLUG_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_]+").expect("slug separator regex is valid"));

/// Derives a display name from a profile URL.
///
/// Pure and infallible: the same URL always yields the same non-empty name.
/// At most the first two meaningful slug fragments are used, each capitalized.
pub fn extract_name_from_url(url: &str) -> String {
    let Some(slug) = PROFILE_SLUG_RE
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
    else {
        return FALLBACK_NAME.to_string();
    };

    let slug = OPAQUE_ID_SUFFIX_RE.replace(&slug, "");

    let parts: Vec<String> = SLUG_SEPARATOR_RE
        .split(&slug)
        .filter(|part| is_name_fragment(part))
        .take(2)
        .map(capitalize)
        .collect();

    if parts.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    parts.join(" ")
}

fn is_name_fragment(part: &str) -> bool {
    part.chars().count() >= 2
        && !part.chars().all(|c| c.is_ascii_digit())
        && !SUFFIX_DENYLIST.contains(&part)
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
