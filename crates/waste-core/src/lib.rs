//! Waste classification: dimension signals, category scoring and the
//! disposal knowledge base, plus offline advice tables.

pub mod advice;
pub mod category;
pub mod error;
pub mod knowledge;
pub mod pipeline;
pub mod result;
pub mod scorer;
pub mod signals;
#[cfg(feature = "wasm")]
pub mod wasm;


pub use category::{WasteCategory, WasteStream};
pub use error::ClassifyError;
pub use knowledge::{lookup, recyclability_score, EnvironmentalImpact, KnowledgeEntry};
pub use pipeline::{
    classify, Classifier, ClassifierConfig, ClassifyRequest, ModelOutcome, ModelPrediction,
    DEFAULT_MODEL_THRESHOLD,
};
pub use result::{ClassificationResult, PredictionQuality, PredictionSource};
pub use scorer::{score, CategoryScorer, CategoryWeights, ConfidenceCurve, Verdict};
pub use signals::{extract_signals, DimensionHeuristic, FeatureSource, ImageDimensions, ImageSignals};
