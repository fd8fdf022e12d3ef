use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use waste_core::advice::default_recommendation;
use waste_service::assistant::recommend_or_default;
use waste_service::{handle_request, AnswerSource, AppState, AssistantConfig, GeminiClient};

/// Stand-in for the generateContent endpoint. Answers every request with
/// `status` and `body` and records the request URIs.
async fn fake_gemini(status: StatusCode, body: Value) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();
    let body = Bytes::from(body.to_string());

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let recorded = recorded.clone();
            let body = body.clone();
            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    recorded.lock().expect("lock").push(req.uri().to_string());
                    let mut resp = Response::new(Full::new(body.clone()));
                    *resp.status_mut() = status;
                    async move { Ok::<_, Infallible>(resp) }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    (addr, seen)
}

fn client(addr: SocketAddr) -> GeminiClient {
    GeminiClient::new(AssistantConfig {
        api_key: "test-key".into(),
        model: "gemini-test".into(),
        endpoint: format!("http://{addr}/v1beta"),
        timeout: Duration::from_secs(5),
    })
    .expect("client")
}

fn reply(text: &str) -> Value {
    json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] })
}

#[tokio::test]
async fn recommendation_parsed_from_fenced_reply() {
    let text = "Here is my advice:\n```json\n{\"recommendation\": \"Tape the terminals and take them to a drop-off point.\", \"environmentalImpact\": [\"Keeps heavy metals out of landfill\"]}\n```";
    let (addr, seen) = fake_gemini(StatusCode::OK, reply(text)).await;
    let gemini = client(addr);

    let (rec, source) = recommend_or_default(Some(&gemini), "Batteries", Some("AA cells")).await;
    assert_eq!(source, AnswerSource::Assistant);
    assert_eq!(rec.recommendation, "Tape the terminals and take them to a drop-off point.");
    assert_eq!(rec.environmental_impact.len(), 1);

    let uris = seen.lock().expect("lock").clone();
    assert_eq!(uris.len(), 1);
    assert!(uris[0].starts_with("/v1beta/models/gemini-test:generateContent"));
    assert!(uris[0].contains("key=test-key"));
}

#[tokio::test]
async fn prose_reply_falls_back_to_offline_table() {
    let (addr, _) = fake_gemini(StatusCode::OK, reply("Just recycle it, friend.")).await;
    let gemini = client(addr);
    let (rec, source) = recommend_or_default(Some(&gemini), "Glass", None).await;
    assert_eq!(source, AnswerSource::Offline);
    assert_eq!(rec, default_recommendation("Glass"));
}

#[tokio::test]
async fn chat_route_returns_reply_and_keyword_tips() {
    let (addr, _) = fake_gemini(StatusCode::OK, reply("Rinse bottles and remove caps.")).await;
    let state = AppState::offline().expect("state").with_assistant(client(addr));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/ai-chat")
        .body(Full::new(Bytes::from(json!({ "message": "What about plastic bottles?" }).to_string())))
        .expect("request");
    let resp = handle_request(state, req).await.expect("infallible");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value =
        serde_json::from_slice(&resp.into_body().collect().await.expect("body").to_bytes()).expect("json");
    assert_eq!(body["message"], "Rinse bottles and remove caps.");
    assert_eq!(body["environmentalTips"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn upstream_error_maps_to_bad_gateway() {
    let (addr, _) = fake_gemini(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" })).await;
    let state = AppState::offline().expect("state").with_assistant(client(addr));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/ai-chat")
        .body(Full::new(Bytes::from(json!({ "message": "hello" }).to_string())))
        .expect("request");
    let metrics = state.metrics.clone();
    let resp = handle_request(state, req).await.expect("infallible");
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        metrics.assistant_fallbacks_total.with_label_values(&["ai-chat"]).get(),
        1
    );
}
