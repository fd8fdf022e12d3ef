#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::knowledge;
use crate::pipeline::{Classifier, ClassifyRequest};

/// Classifies from a JSON request. Stateless: every call builds its own
/// classifier, so nothing is cached between calls.
#[wasm_bindgen]
pub fn classify_json(req: &str) -> String {
    let req: ClassifyRequest = match serde_json::from_str(req) {
        Ok(v) => v,
        Err(e) => {
            return serde_json::json!({ "error": "invalid_json", "detail": e.to_string() }).to_string();
        }
    };

    let result = Classifier::default().classify_with(&req.dimensions, &req.outcome());
    serde_json::to_string(&result).unwrap_or_else(|e| {
        serde_json::json!({ "error": "serialization", "detail": e.to_string() }).to_string()
    })
}

#[wasm_bindgen]
pub fn lookup_json(category: &str) -> String {
    serde_json::to_string(knowledge::lookup(category)).unwrap_or_else(|e| {
        serde_json::json!({ "error": "serialization", "detail": e.to_string() }).to_string()
    })
}
