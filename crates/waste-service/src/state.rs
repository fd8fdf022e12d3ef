use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use waste_core::Classifier;
use waste_directory::{ReferenceStore, SeededStore};
use waste_metrics::SortMetrics;

use crate::assistant::GeminiClient;
use crate::config::ServiceConfig;

pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared, lock-free handler state. Everything here is read-only after
/// startup except the metric collectors, which are atomic.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<Classifier>,
    pub directory: Arc<dyn ReferenceStore>,
    pub metrics: Arc<SortMetrics>,
    pub assistant: Option<Arc<GeminiClient>>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        let directory: Arc<dyn ReferenceStore> = match &config.reference_data {
            Some(path) => Arc::new(
                SeededStore::from_json_path(path)
                    .with_context(|| format!("loading reference data from {}", path.display()))?,
            ),
            None => Arc::new(SeededStore::default()),
        };

        let assistant = match config.assistant_config() {
            Some(cfg) => {
                let client = GeminiClient::new(cfg).context("building assistant client")?;
                info!(model = client.model(), "assistant enabled");
                Some(Arc::new(client))
            }
            None => {
                info!("no GEMINI_API_KEY, assistant routes answer offline");
                None
            }
        };

        Ok(Self {
            classifier: Arc::new(Classifier::new(config.classifier_config())),
            directory,
            metrics: Arc::new(SortMetrics::new().context("registering metrics")?),
            assistant,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Default classifier and seeded directory, no assistant.
    pub fn offline() -> anyhow::Result<Self> {
        Ok(Self {
            classifier: Arc::new(Classifier::default()),
            directory: Arc::new(SeededStore::default()),
            metrics: Arc::new(SortMetrics::new()?),
            assistant: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        })
    }

    pub fn with_assistant(mut self, client: GeminiClient) -> Self {
        self.assistant = Some(Arc::new(client));
        self
    }
}
