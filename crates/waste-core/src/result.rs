use crate::category::WasteCategory;
use crate::knowledge::{self, EnvironmentalImpact};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PredictionQuality {
    High,
    Medium,
    Low,
}

impl PredictionQuality {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.95 {
            PredictionQuality::High
        } else if confidence > 0.85 {
            PredictionQuality::Medium
        } else {
            PredictionQuality::Low
        }
    }
}

/// Where a result's category came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    /// An external model reported a confident prediction.
    Model,
    /// No model was involved.
    Heuristic,
    /// A model answered below the threshold; heuristic with the penalty.
    LowConfidenceFallback,
    /// The model or feature source failed; heuristic without the penalty.
    ErrorFallback,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionSource::Model => "model",
            PredictionSource::Heuristic => "heuristic",
            PredictionSource::LowConfidenceFallback => "low_confidence_fallback",
            PredictionSource::ErrorFallback => "error_fallback",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    #[serde(rename = "type")]
    pub category: WasteCategory,
    pub confidence: f64,
    pub is_recyclable: bool,
    pub recyclability_score: u8,
    pub recyclability_details: String,
    pub disposal_method: String,
    pub material_composition: Vec<String>,
    #[serde(rename = "category")]
    pub category_label: String,
    pub environmental_impact: EnvironmentalImpact,
    pub prediction_quality: PredictionQuality,
    pub source: PredictionSource,
}

impl ClassificationResult {
    /// Assembles the full record for a (category, confidence) pair.
    pub fn compose(category: WasteCategory, confidence: f64, source: PredictionSource) -> Self {
        let confidence = confidence.clamp(0.0, 1.0);
        let entry = knowledge::entry(category);
        Self {
            category,
            confidence,
            is_recyclable: category.is_recyclable(),
            recyclability_score: entry.recyclability_score(confidence),
            recyclability_details: entry.recyclability_details.to_string(),
            disposal_method: entry.disposal_method.to_string(),
            material_composition: entry.material_composition(),
            category_label: entry.category_label.to_string(),
            environmental_impact: entry.environmental_impact,
            prediction_quality: PredictionQuality::from_confidence(confidence),
            source,
        }
    }
}
