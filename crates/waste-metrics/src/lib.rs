use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder,
};
use waste_core::ClassificationResult;

/// Prometheus collectors for the sorting service, on a private registry so
/// several instances can coexist in one process.
pub struct SortMetrics {
    registry: Registry,
    pub classifications_total: IntCounterVec,
    pub classification_confidence: Histogram,
    pub assistant_fallbacks_total: IntCounterVec,
}

impl SortMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let classifications_total = IntCounterVec::new(
            Opts::new(
                "waste_classifications_total",
                "Classifications served, by category and prediction source",
            ),
            &["category", "source"],
        )?;

        let classification_confidence = Histogram::with_opts(
            HistogramOpts::new(
                "waste_classification_confidence",
                "Confidence of served classifications",
            )
            .buckets(vec![0.5, 0.6, 0.65, 0.7, 0.75, 0.8, 0.85, 0.9, 0.95, 1.0]),
        )?;

        let assistant_fallbacks_total = IntCounterVec::new(
            Opts::new(
                "waste_assistant_fallbacks_total",
                "Assistant requests answered from offline tables",
            ),
            &["route"],
        )?;

        registry.register(Box::new(classifications_total.clone()))?;
        registry.register(Box::new(classification_confidence.clone()))?;
        registry.register(Box::new(assistant_fallbacks_total.clone()))?;

        Ok(Self {
            registry,
            classifications_total,
            classification_confidence,
            assistant_fallbacks_total,
        })
    }

    pub fn observe_classification(&self, result: &ClassificationResult) {
        self.classifications_total
            .with_label_values(&[result.category.as_str(), result.source.as_str()])
            .inc();
        self.classification_confidence.observe(result.confidence);
    }

    pub fn observe_assistant_fallback(&self, route: &str) {
        self.assistant_fallbacks_total
            .with_label_values(&[route])
            .inc();
    }

    /// Text exposition of every collector.
    pub fn encode(&self) -> prometheus::Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
