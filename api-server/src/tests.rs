//! Router tests, driven in-process

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use urldna_core::logic::features::FeatureVector;
use urldna_core::logic::model::{Classifier, ClassifierError, HeuristicClassifier, LabelEncoder};

use crate::{create_router, AppState};

struct BrokenClassifier(LabelEncoder);

impl Classifier for BrokenClassifier {
    fn method(&self) -> &'static str {
        "broken"
    }

    fn labels(&self) -> &LabelEncoder {
        &self.0
    }

    fn predict(&self, _: &FeatureVector) -> Result<usize, ClassifierError> {
        Err(ClassifierError::Inference("session poisoned".to_string()))
    }

    fn predict_probabilities(&self, _: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        Err(ClassifierError::Inference("session poisoned".to_string()))
    }
}

fn app() -> Router {
    create_router(AppState {
        classifier: Arc::new(HeuristicClassifier::default()),
    })
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_i64());
}

#[tokio::test]
async fn test_model_status() {
    let request = Request::builder().uri("/model").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["engine"], "heuristic");
    assert_eq!(body["labels"], json!(["benign", "defacement", "malware", "phishing"]));
    assert_eq!(body["layout"]["feature_count"], 24);
}

#[tokio::test]
async fn test_predict() {
    let (status, body) = send(app(), post_json("/predict", json!({"url": " https://www.google.com "}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://www.google.com");
    assert_eq!(body["prediction"], "benign");
    assert_eq!(body["probabilities"].as_object().unwrap().len(), 4);
    assert_eq!(body["dna"].as_object().unwrap().len(), 8);
    assert!(body["confidence"].as_f64().unwrap() > 25.0);
}

#[tokio::test]
async fn test_predict_blank_url_is_bad_request() {
    for payload in [json!({"url": "   "}), json!({})] {
        let (status, body) = send(app(), post_json("/predict", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No URL provided");
        assert_eq!(body["status"], 400);
    }
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_bulk() {
    let payload = json!({"urls": ["https://www.google.com", "", "http://192.168.1.1/files/payload.exe"]});
    let (status, body) = send(app(), post_json("/bulk", payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["results"][0]["prediction"], "benign");
    assert_eq!(body["results"][1]["prediction"], "malware");
    assert!(body["results"][0].get("dna").is_none());
    assert_eq!(
        body["summary"],
        json!({"benign": 1, "defacement": 0, "malware": 1, "phishing": 0})
    );
}

#[tokio::test]
async fn test_bulk_classifies_non_string_entries() {
    let payload = json!({"urls": [null, true, 7, "  "]});
    let (status, body) = send(app(), post_json("/bulk", payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    let urls: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["url"].as_str().unwrap())
        .collect();
    assert_eq!(urls, vec!["None", "True", "7"]);

    let counted: u64 = body["summary"].as_object().unwrap().values().map(|v| v.as_u64().unwrap()).sum();
    assert_eq!(counted, 3);
}

#[tokio::test]
async fn test_bulk_limits() {
    let (status, body) = send(app(), post_json("/bulk", json!({"urls": []}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No URLs provided");

    let urls: Vec<String> = (0..501).map(|i| format!("http://site{}.com", i)).collect();
    let (status, body) = send(app(), post_json("/bulk", json!({ "urls": urls }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Max 500 URLs per batch");
}

#[tokio::test]
async fn test_classifier_failure_is_internal_error() {
    let app = create_router(AppState {
        classifier: Arc::new(BrokenClassifier(LabelEncoder::default())),
    });
    let (status, body) = send(app, post_json("/predict", json!({"url": "http://a.com"}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert_eq!(body["error"], "Classification failed");
}
