//! Profile Extractor — best-effort recovery of profile signals from page HTML.
//!
//! Each field is driven by an ordered list of `FieldRule`s. Rules run in order
//! and the first one whose capture survives its cleaner wins; adding a
//! heuristic means adding a rule, not another branch.
//!
//! Matching is regex-based and will happily pick up a `<title>` or `<h1>` from
//! any page. That is accepted: the output is a hint for personalization, not
//! a faithful parse of the profile markup.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::profile::ProfileSignals;
use crate::profile::slug::extract_name_from_url;

/// One heuristic: a pattern whose first capture group is handed to `clean`.
/// `clean` returns `None` to reject the candidate and let the next rule try.
struct FieldRule {
    label: &'static str,
    pattern: Regex,
    clean: fn(&str) -> Option<String>,
}

impl FieldRule {
    fn new(label: &'static str, pattern: &str, clean: fn(&str) -> Option<String>) -> Self {
        Self {
            label,
            pattern: Regex::new(pattern)
                .unwrap_or_else(|e| panic!("{label} extraction regex is invalid: {e}")),
            clean,
        }
    }
}

/// Runs `rules` in order and returns the first accepted candidate.
fn first_accepted(rules: &[FieldRule], html: &str) -> Option<String> {
    rules.iter().find_map(|rule| {
        let captured = rule.pattern.captures(html)?.get(1)?.as_str();
        let accepted = (rule.clean)(captured);
        if accepted.is_some() {
            debug!("profile rule '{}' matched", rule.label);
        }
        accepted
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Rules
// ────────────────────────────────────────────────────────────────────────────

static NAME_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![
        FieldRule::new("title-element", r"(?i)<title>([^-|]+)(?:\s*[-|]|$)", clean_name),
        FieldRule::new("h1", r"(?i)<h1[^>]*>([^<]+)<", clean_name),
        FieldRule::new(
            "og-title",
            r#"(?i)<meta[^>]*property="og:title"[^>]*content="([^"]+)""#,
            clean_name,
        ),
        FieldRule::new(
            "meta-title",
            r#"(?i)<meta[^>]*name="title"[^>]*content="([^"]+)""#,
            clean_name,
        ),
    ]
});

static TITLE_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![FieldRule::new(
        "description-headline",
        r#"(?i)<meta[^>]*name="description"[^>]*content="([^"]*passionate[^"]*developer[^"]*)"#,
        clean_headline,
    )]
});

static COMPANY_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![FieldRule::new(
        "title-company",
        r"(?i)<title>[^<]+\s*-\s*([^|]+)\s*\|\s*LinkedIn</title>",
        |raw| trimmed_within(raw, 0, 50),
    )]
});

static LOCATION_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![FieldRule::new(
        "description-location",
        r#"(?i)<meta[^>]*name="description"[^>]*content="[^"]*Location:\s*([^·]+)"#,
        |raw| trimmed_within(raw, 1, 100),
    )]
});

static EXPERIENCE_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    vec![FieldRule::new(
        "description-years",
        r#"(?i)<meta[^>]*name="description"[^>]*content="[^"]*?(\d+\s*years?\s*of\s*experience[^"]*)"#,
        |raw| Some(raw.trim().to_string()),
    )]
});

static LINKEDIN_PIPE_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*\|\s*LinkedIn.*$").expect("pipe suffix regex is valid")
});

static LINKEDIN_DASH_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*-\s*LinkedIn.*$").expect("dash suffix regex is valid")
});

static HEADLINE_ROLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)I['’]?m a (.+?) with").expect("headline role regex is valid")
});

// ────────────────────────────────────────────────────────────────────────────
// Cleaners
// ────────────────────────────────────────────────────────────────────────────

/// Pages often double-escape apostrophes (`&amp;#39;`), so that form goes first.
fn unescape_entities(text: &str) -> String {
    text.replace("&amp;#39;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn clean_name(raw: &str) -> Option<String> {
    let name = raw.trim();
    let name = LINKEDIN_PIPE_SUFFIX_RE.replace(name, "");
    let name = LINKEDIN_DASH_SUFFIX_RE.replace(&name, "");
    let name = unescape_entities(&name);

    is_plausible_name(&name).then_some(name)
}

fn is_plausible_name(name: &str) -> bool {
    let len = name.chars().count();
    len > 2
        && len < 100
        && !name.chars().all(|c| c.is_ascii_digit())
        && name.chars().any(|c| c.is_ascii_alphabetic())
        && !name.to_lowercase().contains("invalid")
}

/// Pulls the role out of "I'm a <role> with ..." in the page description.
fn clean_headline(raw: &str) -> Option<String> {
    let decoded = unescape_entities(raw);
    let role = HEADLINE_ROLE_RE.captures(&decoded)?.get(1)?.as_str().trim();
    (!role.is_empty()).then(|| role.to_string())
}

/// Accepts the trimmed text when its length is strictly between `min` and `max`.
fn trimmed_within(raw: &str, min: usize, max: usize) -> Option<String> {
    let value = raw.trim();
    let len = value.chars().count();
    (len > min && len < max).then(|| value.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Public API
// ────────────────────────────────────────────────────────────────────────────

/// Recovers a name from the page, or `None` when no rule yields a plausible one.
pub fn extract_name(html: &str) -> Option<String> {
    first_accepted(&NAME_RULES, html)
}

pub fn extract_title(html: &str) -> Option<String> {
    first_accepted(&TITLE_RULES, html)
}

pub fn extract_company(html: &str) -> Option<String> {
    first_accepted(&COMPANY_RULES, html)
}

pub fn extract_location(html: &str) -> Option<String> {
    first_accepted(&LOCATION_RULES, html)
}

pub fn extract_experience(html: &str) -> Vec<String> {
    first_accepted(&EXPERIENCE_RULES, html).into_iter().collect()
}

/// Builds complete profile signals from a page. Never fails: fields without a
/// match stay empty, and the name falls back to the URL slug.
pub fn extract_profile(html: &str, url: &str) -> ProfileSignals {
    ProfileSignals {
        name: extract_name(html).unwrap_or_else(|| extract_name_from_url(url)),
        title: extract_title(html),
        company: extract_company(html),
        location: extract_location(html),
        experience: extract_experience(html),
        skills: Vec::new(),
    }
}
