//! HTTP shell around the waste classification pipeline, the recycling
//! directory and the Gemini assistant.

pub mod assistant;
pub mod config;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use assistant::{AnswerSource, AssistantConfig, AssistantError, GeminiClient};
pub use config::ServiceConfig;
pub use routes::{handle_request, HttpBody};
pub use state::AppState;
