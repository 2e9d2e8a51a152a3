use serde::{Deserialize, Serialize};

/// Placeholder used in `ProspectAnalysis` for fields that were not recovered.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceScores {
    pub overall: f64,
    pub personalization: f64,
    pub tone: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProspectAnalysis {
    pub name: String,
    pub role: String,
    pub company: String,
    pub insights: Vec<String>,
}

/// Final output of one generation run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub messages: Vec<String>,
    pub thinking_process: String,
    pub confidence_scores: ConfidenceScores,
    pub prospect_analysis: ProspectAnalysis,
    pub using_mock: bool,
    pub ai_provider: String,
}
