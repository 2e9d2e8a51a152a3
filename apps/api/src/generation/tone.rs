//! Tone calibration — turns numeric tone dials into the qualitative phrases
//! the prompt uses.
//!
//! Inputs are clamped to [0, 1] rather than rejected. Thresholds are strict:
//! a value sitting exactly on a threshold falls into the lower bucket.

use serde::{Deserialize, Serialize};

pub const DEFAULT_FORMALITY: f64 = 0.7;
pub const DEFAULT_WARMTH: f64 = 0.6;
pub const DEFAULT_DIRECTNESS: f64 = 0.7;

/// Caller-supplied tone dials. Any field may be missing or out of range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ToneConfig {
    pub formality: Option<f64>,
    pub warmth: Option<f64>,
    pub directness: Option<f64>,
}

/// Clamped dial values plus their qualitative labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneProfile {
    pub formality: f64,
    pub warmth: f64,
    pub directness: f64,
    pub formality_label: &'static str,
    pub warmth_label: &'static str,
    pub directness_label: &'static str,
}

impl ToneProfile {
    /// "formality, warmth, directness" labels, as embedded in prompts and narratives.
    pub fn describe(&self) -> String {
        format!(
            "{}, {}, {}",
            self.formality_label, self.warmth_label, self.directness_label
        )
    }
}

/// Applies defaults, clamps, and buckets each dimension independently.
pub fn normalize_tone(config: Option<&ToneConfig>) -> ToneProfile {
    let config = config.copied().unwrap_or_default();

    let formality = clamp_unit(config.formality.unwrap_or(DEFAULT_FORMALITY));
    let warmth = clamp_unit(config.warmth.unwrap_or(DEFAULT_WARMTH));
    let directness = clamp_unit(config.directness.unwrap_or(DEFAULT_DIRECTNESS));

    ToneProfile {
        formality,
        warmth,
        directness,
        formality_label: formality_label(formality),
        warmth_label: warmth_label(warmth),
        directness_label: directness_label(directness),
    }
}

/// NaN is not a meaningful dial setting; it is clamped to the lower bound.
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

fn formality_label(value: f64) -> &'static str {
    if value > 0.8 {
        "very formal"
    } else if value > 0.6 {
        "professional"
    } else {
        "casual"
    }
}

fn warmth_label(value: f64) -> &'static str {
    if value > 0.7 {
        "warm and friendly"
    } else if value > 0.4 {
        "professional"
    } else {
        "direct and business-focused"
    }
}

fn directness_label(value: f64) -> &'static str {
    if value > 0.7 {
        "very direct"
    } else if value > 0.4 {
        "moderately direct"
    } else {
        "subtle and indirect"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(formality: Option<f64>, warmth: Option<f64>, directness: Option<f64>) -> ToneConfig {
        ToneConfig {
            formality,
            warmth,
            directness,
        }
    }

    #[test]
    fn test_defaults_when_config_absent() {
        let profile = normalize_tone(None);
        assert_eq!(profile.formality, DEFAULT_FORMALITY);
        assert_eq!(profile.warmth, DEFAULT_WARMTH);
        assert_eq!(profile.directness, DEFAULT_DIRECTNESS);
        assert_eq!(profile.formality_label, "professional");
        assert_eq!(profile.warmth_label, "professional");
        // 0.7 is not strictly above the 0.7 threshold.
        assert_eq!(profile.directness_label, "moderately direct");
    }

    #[test]
    fn test_partial_config_fills_missing_fields() {
        let profile = normalize_tone(Some(&tone(Some(0.9), None, None)));
        assert_eq!(profile.formality_label, "very formal");
        assert_eq!(profile.warmth, DEFAULT_WARMTH);
        assert_eq!(profile.directness, DEFAULT_DIRECTNESS);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let profile = normalize_tone(Some(&tone(Some(999.0), Some(-100.0), Some(1.5))));
        assert_eq!(profile.formality, 1.0);
        assert_eq!(profile.warmth, 0.0);
        assert_eq!(profile.directness, 1.0);
        assert_eq!(profile.formality_label, "very formal");
        assert_eq!(profile.warmth_label, "direct and business-focused");
        assert_eq!(profile.directness_label, "very direct");
    }

    #[test]
    fn test_zero_is_a_real_value_not_a_default() {
        let profile = normalize_tone(Some(&tone(Some(0.0), Some(0.0), Some(0.0))));
        assert_eq!(profile.formality_label, "casual");
        assert_eq!(profile.warmth_label, "direct and business-focused");
        assert_eq!(profile.directness_label, "subtle and indirect");
    }

    #[test]
    fn test_threshold_values_fall_into_lower_bucket() {
        assert_eq!(formality_label(0.8), "professional");
        assert_eq!(formality_label(0.6), "casual");
        assert_eq!(warmth_label(0.7), "professional");
        assert_eq!(warmth_label(0.4), "direct and business-focused");
        assert_eq!(directness_label(0.7), "moderately direct");
        assert_eq!(directness_label(0.4), "subtle and indirect");
    }

    #[test]
    fn test_just_above_thresholds() {
        assert_eq!(formality_label(0.81), "very formal");
        assert_eq!(warmth_label(0.71), "warm and friendly");
        assert_eq!(directness_label(0.41), "moderately direct");
    }

    #[test]
    fn test_nan_clamps_to_lower_bound() {
        let profile = normalize_tone(Some(&tone(Some(f64::NAN), None, None)));
        assert_eq!(profile.formality, 0.0);
        assert_eq!(profile.formality_label, "casual");
    }

    #[test]
    fn test_describe_joins_labels_in_order() {
        let profile = normalize_tone(Some(&tone(Some(1.0), Some(1.0), Some(0.0))));
        assert_eq!(
            profile.describe(),
            "very formal, warm and friendly, subtle and indirect"
        );
    }

    #[test]
    fn test_tone_config_deserializes_partial_json() {
        let config: ToneConfig = serde_json::from_str(r#"{"warmth": 0.2}"#).unwrap();
        assert_eq!(config.warmth, Some(0.2));
        assert!(config.formality.is_none());
        let config: ToneConfig = serde_json::from_str(r#"{"formality": null}"#).unwrap();
        assert!(config.formality.is_none());
    }
}
