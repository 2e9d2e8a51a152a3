//! Sequence Generation — orchestrates the full outreach pipeline.
//!
//! Flow: fetch profile (or fall back to URL slug) → extract signals →
//!       normalize tone → build prompt → call provider → resolve response.
//!
//! The generator holds no mutable state; concurrent requests share it freely.

use std::sync::Arc;

use tracing::info;

use crate::generation::prompts::build_sequence_prompt;
use crate::generation::resolver::resolve_response;
use crate::generation::tone::{normalize_tone, ToneConfig};
use crate::llm_client::{ProviderOutcome, TextProvider};
use crate::models::sequence::GenerationResult;
use crate::profile::fetcher::{load_profile, ProfileFetcher};

/// Inputs for one pipeline run. `prospect_url` and `company_context` are
/// expected to be non-empty; the HTTP layer enforces that.
#[derive(Debug, Clone)]
pub struct SequenceRequest {
    pub prospect_url: String,
    pub company_context: String,
    pub tone: Option<ToneConfig>,
    pub sequence_length: usize,
}

/// The outreach pipeline, wired to its two network collaborators.
#[derive(Clone)]
pub struct SequenceGenerator {
    fetcher: Arc<dyn ProfileFetcher>,
    provider: Arc<dyn TextProvider>,
}

impl SequenceGenerator {
    pub fn new(fetcher: Arc<dyn ProfileFetcher>, provider: Arc<dyn TextProvider>) -> Self {
        Self { fetcher, provider }
    }

    /// Whether the provider has a usable credential. No network call.
    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// Runs the pipeline end to end. Always produces a complete result:
    /// fetch and provider failures are absorbed by their fallbacks.
    pub async fn generate_sequence(&self, request: SequenceRequest) -> GenerationResult {
        let signals = load_profile(self.fetcher.as_ref(), &request.prospect_url).await;
        info!(
            "Profile signals: name={:?} title={} company={} location={}",
            signals.name,
            signals.title.is_some(),
            signals.company.is_some(),
            signals.location.is_some()
        );

        let tone = normalize_tone(request.tone.as_ref());

        let prompt = build_sequence_prompt(
            &signals,
            &tone,
            &request.company_context,
            &request.prospect_url,
            request.sequence_length,
        );

        let outcome = self.provider.generate(&prompt).await;
        if outcome == ProviderOutcome::Unavailable {
            info!("Provider unavailable; using fallback message");
        }

        let result = resolve_response(
            outcome,
            self.provider.name(),
            &signals,
            &tone,
            request.sequence_length,
        );

        info!(
            "Generated {} message(s) via {}",
            result.messages.len(),
            result.ai_provider
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmClient;

    struct StaticFetcher(Option<String>);

    #[async_trait]
    impl ProfileFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Option<String> {
            self.0.clone()
        }
    }

    /// Returns a canned outcome and records the prompt it was given.
    struct ScriptedProvider {
        outcome: ProviderOutcome,
        last_prompt: Mutex<Option<String>>,
    }

    impl ScriptedProvider {
        fn new(outcome: ProviderOutcome) -> Self {
            Self {
                outcome,
                last_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "Scripted"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn generate(&self, prompt: &str) -> ProviderOutcome {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.outcome.clone()
        }
    }

    fn request(url: &str, sequence_length: usize) -> SequenceRequest {
        SequenceRequest {
            prospect_url: url.to_string(),
            company_context: "We help SaaS companies automate sales".to_string(),
            tone: None,
            sequence_length,
        }
    }

    #[tokio::test]
    async fn test_end_to_end_without_provider() {
        let generator = SequenceGenerator::new(
            Arc::new(StaticFetcher(None)),
            Arc::new(LlmClient::new(None).unwrap()),
        );
        assert!(!generator.is_configured());

        let result = generator
            .generate_sequence(request("https://linkedin.com/in/john-doe", 2))
            .await;

        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].contains("John Doe"));
        assert!(result.using_mock);
        assert_eq!(result.ai_provider, "Fallback");
        assert_eq!(result.prospect_analysis.name, "John Doe");
        assert_eq!(
            result.prospect_analysis.insights,
            vec!["Name extracted from LinkedIn URL", "Limited profile data available"]
        );
    }

    #[tokio::test]
    async fn test_provider_output_flows_through() {
        let provider = Arc::new(ScriptedProvider::new(ProviderOutcome::Available(
            "```json\n{\"messages\": [\"m1\", \"m2\", \"m3\"]}\n```".to_string(),
        )));
        let html = "<title>Jane Smith - Globex | LinkedIn</title>".to_string();
        let generator =
            SequenceGenerator::new(Arc::new(StaticFetcher(Some(html))), provider.clone());

        let result = generator
            .generate_sequence(request("https://linkedin.com/in/jane-smith", 2))
            .await;

        assert_eq!(result.messages, vec!["m1", "m2"]);
        assert!(!result.using_mock);
        assert_eq!(result.ai_provider, "Scripted");
        assert_eq!(result.prospect_analysis.company, "Globex");
        assert_eq!(result.prospect_analysis.role, "Unknown");

        let prompt = provider.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Company: Globex"));
        assert!(prompt.contains("Write 2 messages that:"));
    }

    #[tokio::test]
    async fn test_unparsable_provider_output_is_not_mock() {
        let generator = SequenceGenerator::new(
            Arc::new(StaticFetcher(None)),
            Arc::new(ScriptedProvider::new(ProviderOutcome::Available(
                "not json at all".to_string(),
            ))),
        );

        let result = generator
            .generate_sequence(request("https://linkedin.com/in/john-doe", 3))
            .await;

        assert_eq!(result.messages.len(), 1);
        assert!(result.messages[0].contains("John Doe"));
        assert!(!result.using_mock);
    }

    #[tokio::test]
    async fn test_tone_reaches_prompt_and_scores() {
        let provider = Arc::new(ScriptedProvider::new(ProviderOutcome::Available(
            r#"{"messages": ["hi"]}"#.to_string(),
        )));
        let generator = SequenceGenerator::new(Arc::new(StaticFetcher(None)), provider.clone());

        let mut req = request("https://linkedin.com/in/test", 1);
        req.tone = Some(ToneConfig {
            formality: Some(999.0),
            warmth: Some(-100.0),
            directness: Some(1.5),
        });
        let result = generator.generate_sequence(req).await;

        assert_eq!(result.confidence_scores.tone, 0.95);
        let prompt = provider.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Tone: very formal, direct and business-focused, very direct"));
    }

    #[tokio::test]
    async fn test_concurrent_runs_do_not_interfere() {
        let generator = SequenceGenerator::new(
            Arc::new(StaticFetcher(None)),
            Arc::new(LlmClient::new(None).unwrap()),
        );

        let urls = [
            "https://linkedin.com/in/alice-walker",
            "https://linkedin.com/in/bob-stone",
            "https://linkedin.com/in/carol-king",
        ];
        let handles: Vec<_> = urls
            .iter()
            .map(|url| {
                let generator = generator.clone();
                let req = request(url, 3);
                tokio::spawn(async move { generator.generate_sequence(req).await })
            })
            .collect();

        let expected = ["Alice Walker", "Bob Stone", "Carol King"];
        for (handle, name) in handles.into_iter().zip(expected) {
            let result = handle.await.unwrap();
            assert_eq!(result.prospect_analysis.name, name);
        }
    }
}
