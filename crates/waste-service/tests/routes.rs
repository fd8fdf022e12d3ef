use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, StatusCode};
use serde_json::{json, Value};
use waste_core::advice::default_recommendation;
use waste_service::{handle_request, AppState};

async fn call_raw(state: &AppState, method: Method, uri: &str, body: Bytes) -> (StatusCode, Bytes) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Full::new(body))
        .expect("request");
    let resp = handle_request(state.clone(), req).await.expect("infallible");
    let status = resp.status();
    let bytes = resp.into_body().collect().await.expect("body").to_bytes();
    (status, bytes)
}

async fn call(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map(|v| Bytes::from(v.to_string())).unwrap_or_default();
    let (status, bytes) = call_raw(state, method, uri, body).await;
    (status, serde_json::from_slice(&bytes).expect("json response"))
}

fn state() -> AppState {
    AppState::offline().expect("offline state")
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = call(&state(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn classify_uses_dimension_heuristic() {
    let s = state();
    let (status, body) = call(
        &s,
        Method::POST,
        "/api/classify",
        Some(json!({ "width": 100, "height": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "Paper");
    assert_eq!(body["category"], "Recycling");
    assert_eq!(body["isRecyclable"], true);
    assert_eq!(body["recyclabilityScore"], 75);
    assert_eq!(body["predictionQuality"], "low");
    assert_eq!(body["source"], "heuristic");
    assert!(body["environmentalImpact"]["energyRecoveryPotentialMJ"].is_number());

    let count = s
        .metrics
        .classifications_total
        .with_label_values(&["Paper", "heuristic"])
        .get();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn classify_trusts_confident_model() {
    let (status, body) = call(
        &state(),
        Method::POST,
        "/api/classify",
        Some(json!({
            "width": 640,
            "height": 480,
            "prediction": { "category": "metal", "confidence": 0.97 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "Metal");
    assert_eq!(body["source"], "model");
    assert_eq!(body["recyclabilityScore"], 98);
    assert_eq!(body["predictionQuality"], "high");
}

#[tokio::test]
async fn classify_reports_model_failure_fallback() {
    let (status, body) = call(
        &state(),
        Method::POST,
        "/api/classify",
        Some(json!({ "width": 640, "height": 480, "predictionError": "model failed to load" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "Organic");
    assert_eq!(body["source"], "error_fallback");
}

#[tokio::test]
async fn classify_rejects_malformed_json() {
    let (status, body) = call_raw(&state(), Method::POST, "/api/classify", Bytes::from_static(b"{width")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).expect("json");
    assert!(body["message"].as_str().unwrap_or_default().starts_with("invalid JSON"));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut s = state();
    s.max_body_bytes = 16;
    let big = Bytes::from(json!({ "width": 100, "height": 100, "padding": "x".repeat(64) }).to_string());
    let (status, _) = call_raw(&s, Method::POST, "/api/classify", big).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn categories_fall_back_to_other() {
    let s = state();
    let (status, all) = call(&s, Method::GET, "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(9));

    let (_, glass) = call(&s, Method::GET, "/api/categories/glass", None).await;
    assert_eq!(glass["type"], "Glass");
    assert_eq!(glass["isRecyclable"], true);

    let (status, unknown) = call(&s, Method::GET, "/api/categories/Unobtanium", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unknown["type"], "Other");
    assert_eq!(unknown["isRecyclable"], false);
}

#[tokio::test]
async fn waste_types_and_learning_resources() {
    let s = state();
    let (_, types) = call(&s, Method::GET, "/api/waste-types", None).await;
    assert_eq!(types.as_array().map(Vec::len), Some(9));
    assert_eq!(types[0]["name"], "Batteries");

    let (_, resources) = call(&s, Method::GET, "/api/learning-resources", None).await;
    assert_eq!(resources.as_array().map(Vec::len), Some(6));

    let (status, one) = call(&s, Method::GET, "/api/learning-resources/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["title"], "Composting 101");

    let (status, _) = call(&s, Method::GET, "/api/learning-resources/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&s, Method::GET, "/api/learning-resources/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recycling_centers_by_distance_and_stream() {
    let s = state();
    let (status, all) = call(&s, Method::GET, "/api/recycling-centers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(5));
    assert_eq!(all[0]["name"], "EcoCycle Recycling Center");
    assert_eq!(all[0]["distance"], 0.0);

    let (_, ewaste) = call(
        &s,
        Method::GET,
        "/api/recycling-centers?latitude=37.7749&longitude=-122.4194&type=E-Waste",
        None,
    )
    .await;
    let names: Vec<_> = ewaste
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert_eq!(names, vec!["TechRecycle Solutions", "Metro Hazardous Waste Facility"]);

    let (status, center) = call(&s, Method::GET, "/api/recycling-centers/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(center["name"], "TechRecycle Solutions");

    let (status, _) = call(&s, Method::GET, "/api/recycling-centers/x", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&s, Method::GET, "/api/recycling-centers/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recommendations_answer_offline_without_key() {
    let s = state();
    let (status, body) = call(
        &s,
        Method::POST,
        "/api/recommendations",
        Some(json!({ "wasteType": "Batteries", "imageDescription": "AA cells" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let expected = serde_json::to_value(default_recommendation("Batteries")).expect("json");
    assert_eq!(body, expected);
    assert_eq!(
        s.metrics
            .assistant_fallbacks_total
            .with_label_values(&["recommendations"])
            .get(),
        1
    );

    let (status, _) = call(&s, Method::POST, "/api/recommendations", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&s, Method::POST, "/api/recommendations", Some(json!({ "wasteType": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_without_key_is_unavailable_with_tips() {
    let s = state();
    let (status, body) = call(&s, Method::POST, "/api/ai-chat", Some(json!({ "message": "how to recycle?" }))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["environmentalTips"].as_array().map(Vec::len), Some(3));
    assert!(body["error"].is_string());

    let (status, _) = call(&s, Method::POST, "/api/ai-chat", Some(json!({ "message": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&s, Method::POST, "/api/ai-chat", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn metrics_expose_served_classifications() {
    let s = state();
    call(&s, Method::POST, "/api/classify", Some(json!({ "width": 100, "height": 100 }))).await;
    let (status, text) = call_raw(&s, Method::GET, "/metrics", Bytes::new()).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(text.to_vec()).expect("utf8");
    assert!(text.contains("waste_classifications_total{category=\"Paper\",source=\"heuristic\"} 1"));
    assert!(text.contains("waste_classification_confidence_count 1"));
}

#[tokio::test]
async fn unknown_routes_are_json_404() {
    let s = state();
    let (status, body) = call(&s, Method::GET, "/api/nothing-here", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "not found");

    let (status, _) = call(&s, Method::GET, "/api/classify", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
