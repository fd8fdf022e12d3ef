use thiserror::Error;

/// Errors raised around the classification pipeline. The pipeline itself
/// recovers from all of them by falling back to the dimension heuristic.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("unknown waste category: {0}")]
    UnknownCategory(String),
    #[error("confidence out of range: {0}")]
    InvalidConfidence(f64),
    #[error("feature source failed: {0}")]
    FeatureSource(String),
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
}
