//! Response Resolver — turns a provider outcome into the final `GenerationResult`.
//!
//! Two fallbacks exist and they are deliberately different: one for "the
//! provider never answered" (mock result) and one for "the provider answered
//! with something unparsable" (real provider, templated message).

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::generation::tone::ToneProfile;
use crate::llm_client::ProviderOutcome;
use crate::models::profile::ProfileSignals;
use crate::models::sequence::{ConfidenceScores, GenerationResult, ProspectAnalysis, UNKNOWN};

/// Provider label used when no provider output was available.
pub const FALLBACK_PROVIDER: &str = "Fallback";

const UNAVAILABLE_NARRATIVE: &str = "AI unavailable, using simple fallback";

const UNAVAILABLE_SCORES: ConfidenceScores = ConfidenceScores {
    overall: 0.5,
    personalization: 0.3,
    tone: 0.5,
};

static JSON_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\s*([\s\S]*?)\s*```").expect("json fence regex is valid"));

#[derive(Debug, Error)]
enum PayloadError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("top-level value is not an object")]
    NotAnObject,

    #[error("`messages` is missing or not a list of strings")]
    Messages,
}

/// Builds the final result for one run.
///
/// `provider_name` is only reported when the provider produced text.
pub fn resolve_response(
    outcome: ProviderOutcome,
    provider_name: &str,
    signals: &ProfileSignals,
    tone: &ToneProfile,
    sequence_length: usize,
) -> GenerationResult {
    let prospect_analysis = ProspectAnalysis {
        name: signals.name.clone(),
        role: signals.title.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        company: signals.company.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        insights: build_insights(signals),
    };

    match outcome {
        ProviderOutcome::Unavailable => GenerationResult {
            messages: vec![unavailable_message(&signals.name)],
            thinking_process: UNAVAILABLE_NARRATIVE.to_string(),
            confidence_scores: UNAVAILABLE_SCORES,
            prospect_analysis,
            using_mock: true,
            ai_provider: FALLBACK_PROVIDER.to_string(),
        },
        ProviderOutcome::Available(text) => GenerationResult {
            messages: parse_messages(&text, sequence_length)
                .unwrap_or_else(|| vec![unparsable_message(&signals.name)]),
            thinking_process: provider_narrative(provider_name, signals, tone),
            confidence_scores: provider_scores(signals, tone),
            prospect_analysis,
            using_mock: false,
            ai_provider: provider_name.to_string(),
        },
    }
}

/// Parses `{"messages": [...]}` out of provider text, tolerating a ```json fence.
/// Returns at most `limit` messages, or `None` when the text is not usable.
pub fn parse_messages(text: &str, limit: usize) -> Option<Vec<String>> {
    let json = if text.contains("```json") {
        JSON_FENCE_RE
            .captures(text)
            .and_then(|c| c.get(1))
            .map_or(text, |m| m.as_str())
    } else {
        text
    };

    match extract_messages(json) {
        Ok(messages) => Some(messages.into_iter().take(limit).collect()),
        Err(e) => {
            warn!("Provider output was not a usable message payload: {e}");
            None
        }
    }
}

/// Only a JSON object carrying a `messages` array of strings is accepted.
fn extract_messages(json: &str) -> Result<Vec<String>, PayloadError> {
    let Value::Object(mut payload) = serde_json::from_str::<Value>(json)? else {
        return Err(PayloadError::NotAnObject);
    };
    let messages = payload.remove("messages").ok_or(PayloadError::Messages)?;
    serde_json::from_value(messages).map_err(|_| PayloadError::Messages)
}

/// Prioritized, human-readable summary of the recovered signals.
pub fn build_insights(signals: &ProfileSignals) -> Vec<String> {
    let mut insights = Vec::new();

    match (&signals.title, &signals.company) {
        (Some(title), Some(company)) => insights.push(format!("Works as {title} at {company}")),
        (Some(title), None) => insights.push(format!("Role: {title}")),
        (None, Some(company)) => insights.push(format!("Works at {company}")),
        (None, None) => {}
    }

    if let Some(location) = &signals.location {
        insights.push(format!("Based in {location}"));
    }

    if let Some(first) = signals.experience.first() {
        insights.push(format!("Experience: {first}"));
    }

    if !signals.skills.is_empty() {
        let top: Vec<&str> = signals.skills.iter().take(3).map(String::as_str).collect();
        insights.push(format!("Skills include: {}", top.join(", ")));
    }

    if insights.is_empty() {
        insights.push("Name extracted from LinkedIn URL".to_string());
        insights.push("Limited profile data available".to_string());
    }

    insights
}

fn unavailable_message(name: &str) -> String {
    format!(
        "Hi {name}, I found your LinkedIn profile and would like to discuss how we help \
         companies automate their sales processes. Interested in a brief call?"
    )
}

fn unparsable_message(name: &str) -> String {
    format!("Hi {name}, interested in discussing sales automation for your team?")
}

fn provider_narrative(
    provider_name: &str,
    signals: &ProfileSignals,
    tone: &ToneProfile,
) -> String {
    let describe = |label: &str, value: &Option<String>| match value {
        Some(v) => format!("{label} ({v})"),
        None => format!("no {label}"),
    };

    format!(
        "Generated using {provider_name} AI with tone: {}. Extracted: {}, {}, {}.",
        tone.describe(),
        describe("title", &signals.title),
        describe("company", &signals.company),
        describe("location", &signals.location),
    )
}

fn provider_scores(signals: &ProfileSignals, tone: &ToneProfile) -> ConfidenceScores {
    ConfidenceScores {
        overall: 0.85,
        personalization: if signals.title.is_some() && signals.company.is_some() {
            0.9
        } else {
            0.7
        },
        tone: if tone.formality > 0.8 { 0.95 } else { 0.85 },
    }
}
