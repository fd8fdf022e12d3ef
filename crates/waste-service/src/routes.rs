use std::collections::HashMap;
use std::convert::Infallible;
use std::error::Error as StdError;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;
use waste_core::advice::{environmental_tips, FALLBACK_TIPS};
use waste_core::{knowledge, ClassifyRequest};
use waste_directory::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};

use crate::assistant::{recommend_or_default, AnswerSource, AssistantError};
use crate::state::AppState;

pub type HttpBody = Full<Bytes>;

type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationRequest {
    #[serde(default)]
    waste_type: Option<String>,
    #[serde(default)]
    image_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatResponse {
    message: String,
    environmental_tips: Vec<String>,
}

/// Entry point for every connection's requests. Runs the router inside a
/// span carrying a fresh request id.
pub async fn handle_request<B>(state: AppState, req: Request<B>) -> Result<Response<HttpBody>, Infallible>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let span = info_span!(
        "request",
        id = %Uuid::new_v4(),
        method = %req.method(),
        path = %req.uri().path(),
    );
    let resp = route(state, req).instrument(span.clone()).await;
    span.in_scope(|| debug!(status = resp.status().as_u16(), "response"));
    Ok(resp)
}

async fn route<B>(state: AppState, req: Request<B>) -> Response<HttpBody>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = query_params(req.uri().query());
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (&method, segments.as_slice()) {
        (&Method::GET, ["health"]) => json_response(StatusCode::OK, &serde_json::json!({ "status": "ok" })),

        (&Method::POST, ["api", "classify"]) => {
            let body: ClassifyRequest = match read_json(req.into_body(), state.max_body_bytes).await {
                Ok(v) => v,
                Err(resp) => return resp,
            };
            let result = state.classifier.classify_with(&body.dimensions, &body.outcome());
            state.metrics.observe_classification(&result);
            info!(
                category = %result.category,
                confidence = result.confidence,
                source = result.source.as_str(),
                "classified"
            );
            json_response(StatusCode::OK, &result)
        }

        (&Method::GET, ["api", "categories"]) => json_response(StatusCode::OK, &knowledge::entries()),
        (&Method::GET, ["api", "categories", name]) => {
            json_response(StatusCode::OK, knowledge::lookup(&decode(name)))
        }

        (&Method::GET, ["api", "waste-types"]) => json_response(StatusCode::OK, &state.directory.waste_types()),

        (&Method::GET, ["api", "learning-resources"]) => {
            json_response(StatusCode::OK, &state.directory.learning_resources())
        }
        (&Method::GET, ["api", "learning-resources", id]) => match id.parse::<u32>() {
            Err(_) => error_response(StatusCode::BAD_REQUEST, "Invalid learning resource ID"),
            Ok(id) => match state.directory.learning_resource(id) {
                Some(resource) => json_response(StatusCode::OK, &resource),
                None => error_response(StatusCode::NOT_FOUND, "Learning resource not found"),
            },
        },

        (&Method::GET, ["api", "recycling-centers"]) => {
            let latitude = coordinate(&query, "latitude", DEFAULT_LATITUDE);
            let longitude = coordinate(&query, "longitude", DEFAULT_LONGITUDE);
            let stream = query.get("type").map(String::as_str);
            let centers = state.directory.nearby_centers(latitude, longitude, stream);
            debug!(latitude, longitude, ?stream, found = centers.len(), "nearby centers");
            json_response(StatusCode::OK, &centers)
        }
        (&Method::GET, ["api", "recycling-centers", id]) => match id.parse::<u32>() {
            Err(_) => error_response(StatusCode::BAD_REQUEST, "Invalid recycling center ID"),
            Ok(id) => match state.directory.recycling_center(id) {
                Some(center) => json_response(StatusCode::OK, &center),
                None => error_response(StatusCode::NOT_FOUND, "Recycling center not found"),
            },
        },

        (&Method::POST, ["api", "recommendations"]) => {
            let body: RecommendationRequest = match read_json(req.into_body(), state.max_body_bytes).await {
                Ok(v) => v,
                Err(resp) => return resp,
            };
            let Some(waste_type) = body.waste_type.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
                return error_response(StatusCode::BAD_REQUEST, "Waste type is required");
            };
            let (rec, source) =
                recommend_or_default(state.assistant.as_deref(), waste_type, body.image_description.as_deref()).await;
            if source == AnswerSource::Offline {
                state.metrics.observe_assistant_fallback("recommendations");
            }
            json_response(StatusCode::OK, &rec)
        }

        (&Method::POST, ["api", "ai-chat"]) => {
            let body: ChatRequest = match read_json(req.into_body(), state.max_body_bytes).await {
                Ok(v) => v,
                Err(resp) => return resp,
            };
            let Some(message) = body.message.as_deref().map(str::trim).filter(|m| !m.is_empty()) else {
                return error_response(StatusCode::BAD_REQUEST, "Message must not be empty");
            };
            chat(&state, message).await
        }

        (&Method::GET, ["metrics"]) => match state.metrics.encode() {
            Ok(text) => text_response(StatusCode::OK, "text/plain; version=0.0.4", text),
            Err(e) => {
                error!(error = %e, "metrics encoding failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "metrics unavailable")
            }
        },

        _ => error_response(StatusCode::NOT_FOUND, "not found"),
    }
}

async fn chat(state: &AppState, message: &str) -> Response<HttpBody> {
    let outcome = match state.assistant.as_deref() {
        Some(client) => client.chat(message).await,
        None => Err(AssistantError::NotConfigured),
    };
    match outcome {
        Ok(reply) => json_response(
            StatusCode::OK,
            &ChatResponse {
                message: reply,
                environmental_tips: environmental_tips(message),
            },
        ),
        Err(e) => {
            let status = match e {
                AssistantError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::BAD_GATEWAY,
            };
            warn!(error = %e, status = status.as_u16(), "assistant chat unavailable");
            state.metrics.observe_assistant_fallback("ai-chat");
            json_response(
                status,
                &serde_json::json!({
                    "error": e.to_string(),
                    "message": "The assistant is unavailable right now. Meanwhile, here are some general tips.",
                    "environmentalTips": FALLBACK_TIPS,
                }),
            )
        }
    }
}

/// Collects at most `limit` bytes of body and parses them as JSON. The
/// error side is the response to send back.
async fn read_json<B, T>(body: B, limit: usize) -> Result<T, Response<HttpBody>>
where
    B: Body,
    B::Error: Into<BoxError>,
    T: DeserializeOwned,
{
    let bytes = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            return Err(error_response(StatusCode::PAYLOAD_TOO_LARGE, "request body too large"));
        }
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            return Err(error_response(StatusCode::BAD_REQUEST, "unreadable request body"));
        }
    };
    serde_json::from_slice(&bytes)
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, &format!("invalid JSON: {e}")))
}

fn query_params(query: Option<&str>) -> HashMap<String, String> {
    query
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (!key.is_empty()).then(|| (decode(key), decode(&value.replace('+', " "))))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Missing or unparseable coordinates fall back to the default point.
fn coordinate(query: &HashMap<String, String>, key: &str, default: f64) -> f64 {
    query
        .get(key)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response<HttpBody> {
    match serde_json::to_vec(body) {
        Ok(bytes) => build(status, "application/json", Bytes::from(bytes)),
        Err(e) => {
            error!(error = %e, "response serialization failed");
            build(
                StatusCode::INTERNAL_SERVER_ERROR,
                "application/json",
                Bytes::from_static(b"{\"message\":\"serialization failed\"}"),
            )
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response<HttpBody> {
    json_response(status, &serde_json::json!({ "message": message }))
}

fn text_response(status: StatusCode, content_type: &'static str, body: String) -> Response<HttpBody> {
    build(status, content_type, Bytes::from(body))
}

fn build(status: StatusCode, content_type: &'static str, body: Bytes) -> Response<HttpBody> {
    let mut resp = Response::new(Full::new(body));
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_parsing_decodes_values() {
        let q = query_params(Some("latitude=37.78&longitude=-122.41&type=E-Waste&note=a+b%21"));
        assert_eq!(q.get("type").map(String::as_str), Some("E-Waste"));
        assert_eq!(q.get("note").map(String::as_str), Some("a b!"));
        assert_eq!(coordinate(&q, "latitude", 0.0), 37.78);
        assert!(query_params(None).is_empty());
        assert!(query_params(Some("&&")).is_empty());
    }

    #[test]
    fn bad_coordinates_use_default() {
        let q = query_params(Some("latitude=north&longitude=NaN"));
        assert_eq!(coordinate(&q, "latitude", DEFAULT_LATITUDE), DEFAULT_LATITUDE);
        assert_eq!(coordinate(&q, "longitude", DEFAULT_LONGITUDE), DEFAULT_LONGITUDE);
        assert_eq!(coordinate(&q, "missing", 1.5), 1.5);
    }

    #[test]
    fn responses_carry_json_content_type() {
        let resp = error_response(StatusCode::NOT_FOUND, "nope");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers().get(CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"application/json"[..])
        );
    }
}
