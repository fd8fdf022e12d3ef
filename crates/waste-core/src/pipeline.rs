use crate::category::WasteCategory;
use crate::error::ClassifyError;
use crate::result::{ClassificationResult, PredictionSource};
use crate::scorer::{CategoryScorer, ConfidenceCurve};
use crate::signals::{DimensionHeuristic, FeatureSource, ImageDimensions, ImageSignals};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Model confidence below which the heuristic takes over.
pub const DEFAULT_MODEL_THRESHOLD: f64 = 0.75;

/// A prediction computed outside this crate, e.g. by in-browser inference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelPrediction {
    pub category: String,
    pub confidence: f64,
}

impl ModelPrediction {
    pub fn validated(&self) -> Result<(WasteCategory, f64), ClassifyError> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(ClassifyError::InvalidConfidence(self.confidence));
        }
        Ok((WasteCategory::resolve(&self.category), self.confidence))
    }
}

/// What the image-acquisition layer knows about a model run.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModelOutcome {
    #[default]
    NotRun,
    Predicted(ModelPrediction),
    Failed(String),
}

/// Wire shape of a classification request: image dimensions plus whatever
/// the client-side model reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    #[serde(flatten)]
    pub dimensions: ImageDimensions,
    #[serde(default)]
    pub prediction: Option<ModelPrediction>,
    #[serde(default)]
    pub prediction_error: Option<String>,
}

impl ClassifyRequest {
    /// A reported error wins over a reported prediction.
    pub fn outcome(&self) -> ModelOutcome {
        match (&self.prediction, &self.prediction_error) {
            (_, Some(reason)) => ModelOutcome::Failed(reason.clone()),
            (Some(prediction), None) => ModelOutcome::Predicted(prediction.clone()),
            (None, None) => ModelOutcome::NotRun,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub curve: ConfidenceCurve,
    pub model_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            curve: ConfidenceCurve::Conservative,
            model_threshold: DEFAULT_MODEL_THRESHOLD,
        }
    }
}

/// Application-scoped classification context. Owns the feature source, so
/// any model handle lives and dies with it instead of in a global.
pub struct Classifier {
    config: ClassifierConfig,
    scorer: CategoryScorer,
    features: Box<dyn FeatureSource>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self::with_source(config, Box::new(DimensionHeuristic))
    }

    pub fn with_source(config: ClassifierConfig, features: Box<dyn FeatureSource>) -> Self {
        Self {
            config,
            scorer: CategoryScorer::new(config.curve),
            features,
        }
    }

    pub fn config(&self) -> ClassifierConfig {
        self.config
    }

    pub fn feature_source(&self) -> &'static str {
        self.features.name()
    }

    pub fn classify(&self, image: &ImageDimensions) -> ClassificationResult {
        self.classify_with(image, &ModelOutcome::NotRun)
    }

    pub fn classify_with(&self, image: &ImageDimensions, outcome: &ModelOutcome) -> ClassificationResult {
        self.classify_with_rng(image, outcome, &mut rand::thread_rng())
    }

    /// Full pipeline. A confident model prediction is used as is; anything
    /// else runs the signal heuristic, and the fallback is logged.
    pub fn classify_with_rng<R: Rng + ?Sized>(
        &self,
        image: &ImageDimensions,
        outcome: &ModelOutcome,
        rng: &mut R,
    ) -> ClassificationResult {
        match outcome {
            ModelOutcome::NotRun => self.heuristic(image, false, PredictionSource::Heuristic, rng),
            ModelOutcome::Failed(reason) => {
                warn!(%reason, "model failed, using dimension heuristic");
                self.heuristic(image, false, PredictionSource::ErrorFallback, rng)
            }
            ModelOutcome::Predicted(prediction) => match prediction.validated() {
                Ok((category, confidence)) if confidence >= self.config.model_threshold => {
                    debug!(%category, confidence, "using model prediction");
                    ClassificationResult::compose(category, confidence, PredictionSource::Model)
                }
                Ok((category, confidence)) => {
                    warn!(
                        %category,
                        confidence,
                        threshold = self.config.model_threshold,
                        "model prediction below threshold"
                    );
                    self.heuristic(image, true, PredictionSource::LowConfidenceFallback, rng)
                }
                Err(e) => {
                    warn!(error = %e, "rejected model prediction");
                    self.heuristic(image, false, PredictionSource::ErrorFallback, rng)
                }
            },
        }
    }

    fn signals(&self, image: &ImageDimensions) -> (ImageSignals, bool) {
        match self.features.extract(image) {
            Ok(signals) => (signals.clamped(), false),
            Err(e) => {
                warn!(source = self.features.name(), error = %e, "feature source failed");
                (crate::signals::extract_signals(image), true)
            }
        }
    }

    fn heuristic<R: Rng + ?Sized>(
        &self,
        image: &ImageDimensions,
        low_confidence: bool,
        source: PredictionSource,
        rng: &mut R,
    ) -> ClassificationResult {
        let (signals, source_failed) = self.signals(image);
        let source = if source_failed {
            PredictionSource::ErrorFallback
        } else {
            source
        };
        let verdict = self.scorer.score_with_rng(&signals, low_confidence, rng);
        debug!(
            category = %verdict.category,
            confidence = verdict.confidence,
            margin = verdict.margin,
            "heuristic verdict"
        );
        ClassificationResult::compose(verdict.category, verdict.confidence, source)
    }
}

/// Classifies with the default heuristic pipeline.
pub fn classify(image: &ImageDimensions) -> ClassificationResult {
    Classifier::default().classify(image)
}
