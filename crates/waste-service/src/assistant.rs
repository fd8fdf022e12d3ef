//! Gemini-backed assistant for disposal recommendations and free-form chat.
//!
//! Every caller has an offline answer ready: the assistant only ever makes
//! an answer better, it never makes a route fail outright.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use waste_core::advice::{default_recommendation, Recommendation};

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant is not configured")]
    NotConfigured,
    #[error("assistant request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("assistant returned status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("assistant returned no text")]
    EmptyResponse,
    #[error("assistant reply is not a recommendation: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Assistant,
    Offline,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate, if non-blank.
    pub(crate) fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
    }
}

pub struct GeminiClient {
    http: reqwest::Client,
    config: AssistantConfig,
}

impl GeminiClient {
    pub fn new(config: AssistantConfig) -> Result<Self, AssistantError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    /// One `generateContent` round trip; returns the reply text.
    pub async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 1024,
            },
        };

        let resp = self
            .http
            .post(self.url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let mut body = resp.text().await.unwrap_or_default();
            truncate_on_char_boundary(&mut body, 256);
            return Err(AssistantError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        parsed.first_text().ok_or(AssistantError::EmptyResponse)
    }

    pub async fn recommend(
        &self,
        waste_type: &str,
        image_description: Option<&str>,
    ) -> Result<Recommendation, AssistantError> {
        let text = self.generate(&recommendation_prompt(waste_type, image_description)).await?;
        parse_recommendation(&text)
    }

    pub async fn chat(&self, message: &str) -> Result<String, AssistantError> {
        self.generate(&chat_prompt(message)).await
    }
}

fn truncate_on_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let cut = (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    s.truncate(cut);
}

pub fn recommendation_prompt(waste_type: &str, image_description: Option<&str>) -> String {
    let description = image_description
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| format!("Image description: {d}\n"))
        .unwrap_or_default();
    format!(
        "You are a waste management and recycling expert.\n\
         Waste type: {waste_type}\n\
         {description}\
         Give practical disposal or recycling advice for this item and list its \
         environmental impact. Answer with a single JSON object of the form \
         {{\"recommendation\": \"...\", \"environmentalImpact\": [\"...\", \"...\"]}}."
    )
}

pub fn chat_prompt(message: &str) -> String {
    format!(
        "You are the assistant of a smart waste management app. Give accurate, \
         useful information about recycling different kinds of waste, the \
         environmental impact of waste, sustainable waste management practices \
         and everyday tips for producing less waste.\n\nUser question: {message}"
    )
}

/// Finds the JSON object in a model reply: a fenced ```json block if there
/// is one, else the span from the first `{` to the last `}`.
pub fn extract_json_object(text: &str) -> Option<&str> {
    if let Some(start) = text.find("```json") {
        let rest = &text[start + "```json".len()..];
        if let Some(end) = rest.find("```") {
            let inner = rest[..end].trim();
            if !inner.is_empty() {
                return Some(inner);
            }
        }
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn parse_recommendation(text: &str) -> Result<Recommendation, AssistantError> {
    let raw = extract_json_object(text)
        .ok_or_else(|| AssistantError::Parse("no JSON object in reply".into()))?;
    let rec: Recommendation =
        serde_json::from_str(raw).map_err(|e| AssistantError::Parse(e.to_string()))?;
    if rec.recommendation.trim().is_empty() {
        return Err(AssistantError::Parse("empty recommendation".into()));
    }
    Ok(rec)
}

/// Recommendation from the assistant, or the offline table when there is no
/// assistant or it fails.
pub async fn recommend_or_default(
    assistant: Option<&GeminiClient>,
    waste_type: &str,
    image_description: Option<&str>,
) -> (Recommendation, AnswerSource) {
    let Some(client) = assistant else {
        debug!(waste_type, "no assistant configured, using offline recommendation");
        return (default_recommendation(waste_type), AnswerSource::Offline);
    };
    match client.recommend(waste_type, image_description).await {
        Ok(rec) => (rec, AnswerSource::Assistant),
        Err(e) => {
            warn!(waste_type, error = %e, "assistant recommendation failed, using offline table");
            (default_recommendation(waste_type), AnswerSource::Offline)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fenced_block_first() {
        let text = "Sure! {not this}\n```json\n{\"recommendation\": \"Rinse it\", \"environmentalImpact\": []}\n```\nDone.";
        assert_eq!(
            extract_json_object(text),
            Some("{\"recommendation\": \"Rinse it\", \"environmentalImpact\": []}")
        );
    }

    #[test]
    fn extracts_bare_object_span() {
        let text = "Here you go: {\"recommendation\": \"Compost it\", \"environmentalImpact\": [\"Less methane\"]} hope it helps";
        let rec = parse_recommendation(text).expect("parsed");
        assert_eq!(rec.recommendation, "Compost it");
        assert_eq!(rec.environmental_impact, vec!["Less methane".to_string()]);
    }

    #[test]
    fn rejects_replies_without_json() {
        assert!(extract_json_object("no braces here").is_none());
        assert!(extract_json_object("} backwards {").is_none());
        assert!(matches!(parse_recommendation("plain prose"), Err(AssistantError::Parse(_))));
        assert!(matches!(
            parse_recommendation("{\"recommendation\": \"  \", \"environmentalImpact\": []}"),
            Err(AssistantError::Parse(_))
        ));
    }

    #[test]
    fn first_text_skips_blank_replies() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"hello"}],"role":"model"}}]}"#,
        )
        .expect("response");
        assert_eq!(parsed.first_text().as_deref(), Some("hello"));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).expect("response");
        assert!(empty.first_text().is_none());
        let blank: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":" "}]}}]}"#).expect("response");
        assert!(blank.first_text().is_none());
    }

    #[test]
    fn prompts_carry_the_inputs() {
        let p = recommendation_prompt("Glass", Some("a green wine bottle"));
        assert!(p.contains("Waste type: Glass"));
        assert!(p.contains("a green wine bottle"));
        assert!(!recommendation_prompt("Glass", Some("  ")).contains("Image description"));
        assert!(chat_prompt("how do I recycle foil?").ends_with("how do I recycle foil?"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut s = "ab\u{e9}cd".to_string();
        truncate_on_char_boundary(&mut s, 100);
        assert_eq!(s, "ab\u{e9}cd");
        truncate_on_char_boundary(&mut s, 3);
        assert_eq!(s, "ab");
    }

    #[tokio::test]
    async fn offline_without_client() {
        let (rec, source) = recommend_or_default(None, "Batteries", None).await;
        assert_eq!(source, AnswerSource::Offline);
        assert_eq!(rec, default_recommendation("Batteries"));
    }
}
