// Prompt template and builder for outreach sequence generation.
// Pure formatting: identical inputs always produce the identical prompt.

use crate::generation::tone::ToneProfile;
use crate::models::profile::ProfileSignals;

/// Response shape the provider is asked to return. The resolver only relies
/// on `messages`; the other keys give the model room to explain itself.
pub const JSON_RESPONSE_SHAPE: &str = r#"{"messages": ["personalized message 1", "personalized message 2"], "thinking_process": "explanation", "confidence_scores": {"overall": 0.85, "personalization": 0.80, "tone": 0.90}}"#;

/// Sequence generation prompt template.
/// Replace: {json_shape}, {sequence_length}, {tone}, {prospect_info},
///          {prospect_url}, {name}, {company_context}
pub const SEQUENCE_PROMPT_TEMPLATE: &str = r#"Write sales messages for {name}.

AVAILABLE INFORMATION:
{prospect_info}
LinkedIn URL: {prospect_url}

REQUIREMENTS:
✅ Use the verified information above
✅ Personalize based on their role and company if available
✅ Create professional, engaging messages
✅ Tone: {tone}
❌ NO fake details beyond what's provided
❌ NO placeholders, NO brackets [ ]

Context: {company_context}

Write {sequence_length} messages that:
1. Use their real name and title/company if known
2. Reference their actual role or industry experience
3. Connect their background to the value proposition: {company_context}
4. Sound professional and well-researched

JSON format:
{json_shape}

Be personalized and professional."#;

/// Renders the labeled profile block. Only present fields get a line.
pub fn format_profile(signals: &ProfileSignals) -> String {
    let mut lines = vec![format!("Name: {}", signals.name)];

    if let Some(title) = &signals.title {
        lines.push(format!("Current Title: {title}"));
    }
    if let Some(company) = &signals.company {
        lines.push(format!("Company: {company}"));
    }
    if let Some(location) = &signals.location {
        lines.push(format!("Location: {location}"));
    }
    if !signals.experience.is_empty() {
        lines.push(format!("Experience: {}", signals.experience.join(", ")));
    }
    if !signals.skills.is_empty() {
        lines.push(format!("Skills: {}", signals.skills.join(", ")));
    }

    lines.join("\n")
}

/// Fills the sequence template in one pass. Substituted values are copied
/// verbatim and never rescanned, so braces in page text or URLs stay literal.
pub fn build_sequence_prompt(
    signals: &ProfileSignals,
    tone: &ToneProfile,
    company_context: &str,
    prospect_url: &str,
    sequence_length: usize,
) -> String {
    let sequence_length = sequence_length.to_string();
    let tone = tone.describe();
    let prospect_info = format_profile(signals);

    fill_template(
        SEQUENCE_PROMPT_TEMPLATE,
        &[
            ("json_shape", JSON_RESPONSE_SHAPE),
            ("sequence_length", sequence_length.as_str()),
            ("tone", tone.as_str()),
            ("prospect_info", prospect_info.as_str()),
            ("prospect_url", prospect_url),
            ("name", signals.name.as_str()),
            ("company_context", company_context),
        ],
    )
}

/// Replaces each `{key}` in `template` with its value. Unknown `{...}` runs
/// are kept as written.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, close))
        });

        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
