use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::ensure;
use clap::Parser;
use waste_core::{ClassifierConfig, ConfidenceCurve, DEFAULT_MODEL_THRESHOLD};

use crate::assistant::AssistantConfig;

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Service configuration. Every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "waste-service", version, about = "Waste classification and recycling directory service")]
pub struct ServiceConfig {
    /// Address to listen on.
    #[arg(long, env = "WASTE_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Gemini API key; without one the assistant routes answer offline.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = "gemini-1.5-flash")]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_GEMINI_ENDPOINT)]
    pub gemini_endpoint: String,

    #[arg(long, env = "WASTE_ASSISTANT_TIMEOUT_SECS", default_value_t = 20)]
    pub assistant_timeout_secs: u64,

    /// Model confidence below which the dimension heuristic takes over.
    #[arg(long, env = "WASTE_MODEL_THRESHOLD", default_value_t = DEFAULT_MODEL_THRESHOLD)]
    pub model_threshold: f64,

    /// `conservative` or `boosted`.
    #[arg(long, env = "WASTE_CONFIDENCE_CURVE", default_value = "conservative")]
    pub confidence_curve: ConfidenceCurve,

    /// JSON file replacing the seeded reference data.
    #[arg(long, env = "WASTE_REFERENCE_DATA")]
    pub reference_data: Option<PathBuf>,

    /// Largest accepted request body.
    #[arg(long, env = "WASTE_MAX_BODY_BYTES", default_value_t = crate::state::DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    #[arg(long, env = "WASTE_LOG_JSON", default_value_t = false)]
    pub log_json: bool,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}

impl ServiceConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.model_threshold.is_finite() && (0.0..=1.0).contains(&self.model_threshold),
            "model threshold must be within [0, 1], got {}",
            self.model_threshold
        );
        ensure!(self.assistant_timeout_secs > 0, "assistant timeout must be positive");
        ensure!(self.max_body_bytes > 0, "max body size must be positive");
        Ok(())
    }

    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            curve: self.confidence_curve,
            model_threshold: self.model_threshold,
        }
    }

    /// `None` when no usable API key is configured.
    pub fn assistant_config(&self) -> Option<AssistantConfig> {
        let api_key = self.gemini_api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())?;
        Some(AssistantConfig {
            api_key: api_key.to_string(),
            model: self.gemini_model.clone(),
            endpoint: self.gemini_endpoint.clone(),
            timeout: Duration::from_secs(self.assistant_timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServiceConfig {
        let mut argv = vec!["waste-service"];
        argv.extend_from_slice(args);
        ServiceConfig::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse(&[
            "--bind",
            "0.0.0.0:9000",
            "--confidence-curve",
            "boosted",
            "--model-threshold",
            "0.6",
            "--gemini-api-key",
            "k",
        ]);
        assert_eq!(cfg.bind.port(), 9000);
        assert_eq!(cfg.classifier_config().curve, ConfidenceCurve::Boosted);
        assert_eq!(cfg.classifier_config().model_threshold, 0.6);
        let assistant = cfg.assistant_config().expect("assistant configured");
        assert_eq!(assistant.api_key, "k");
        assert_eq!(assistant.timeout, Duration::from_secs(cfg.assistant_timeout_secs));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn blank_key_means_offline() {
        let cfg = parse(&["--gemini-api-key", "  "]);
        assert!(cfg.assistant_config().is_none());
    }

    #[test]
    fn rejects_threshold_out_of_range() {
        let cfg = parse(&["--model-threshold", "1.5"]);
        assert!(cfg.validate().is_err());
        assert!(ServiceConfig::try_parse_from(["waste-service", "--confidence-curve", "wild"]).is_err());
    }
}
