// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn health_check_works() {
    let app = create_test_app("");

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn version_matches_crate() {
    let app = create_test_app("");

    let response = app.server.get("/v1/version").await;

    response.assert_status_ok();
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn about_lists_dataset_and_models() {
    let app = create_test_app("");

    let body: Value = app.server.get("/v1/about").await.json();

    assert_eq!(body["dataset"]["total"], 26584);
    assert_eq!(body["dataset"]["legitimate"], 16060);
    assert_eq!(body["dataset"]["phishing"], 10524);
    assert_eq!(body["features"].as_array().unwrap().len(), 14);
    assert_eq!(body["models"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn list_models_returns_loaded_names() {
    let app = create_test_app("");

    let response = app.server.get("/v1/models").await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "models": ["Decision Tree", "Random Forest", "XGBoost"]
    }));
}

#[tokio::test]
async fn classify_returns_verdict_and_features() {
    let app = create_test_app("<html><body>welcome</body></html>");

    let response = app
        .server
        .post("/v1/classify")
        .json(&json!({ "url": "http://192.168.1.1/login", "model": "Random Forest" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["verdict"], "phishing");
    assert_eq!(body["model"], "Random Forest");
    assert_eq!(
        body["message"],
        "Attention! This web page is a potential phishing site!"
    );
    assert_eq!(body["features"]["ip"], 1.0);
    assert_eq!(body["features"]["length_url"], 24.0);
    assert_eq!(body["degraded"], json!([]));
    assert_eq!(app.fetcher.calls(), 1);
}

#[tokio::test]
async fn classify_uses_page_content() {
    let app = create_test_app("<html><body><iframe src='//ads'></iframe></body></html>");

    let body: Value = app
        .server
        .post("/v1/classify")
        .json(&json!({ "url": "https://example.com/", "model": "XGBoost" }))
        .await
        .json();

    assert_eq!(body["verdict"], "phishing");
    assert_eq!(body["features"]["iframe"], 1.0);
}

#[tokio::test]
async fn classify_legitimate_message() {
    let app = create_test_app("");

    let body: Value = app
        .server
        .post("/v1/classify")
        .json(&json!({ "url": "https://example.com/", "model": "Decision Tree" }))
        .await
        .json();

    assert_eq!(body["verdict"], "legitimate");
    assert_eq!(body["message"], "This web page seems legitimate!");
}

#[tokio::test]
async fn classify_unknown_model_is_404_without_fetch() {
    let app = create_test_app("");

    let response = app
        .server
        .post("/v1/classify")
        .json(&json!({ "url": "https://example.com/", "model": "Nonexistent Model" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Nonexistent Model"));
    assert_eq!(app.fetcher.calls(), 0);
}

#[tokio::test]
async fn classify_missing_artifact_model_is_404() {
    // SVM is a known model name, but no artifact was written for it
    let app = create_test_app("");

    let response = app
        .server
        .post("/v1/classify")
        .json(&json!({ "url": "https://example.com/", "model": "SVM" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn classify_empty_url_is_400() {
    let app = create_test_app("");

    let response = app
        .server
        .post("/v1/classify")
        .json(&json!({ "url": "", "model": "Decision Tree" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.fetcher.calls(), 0);
}

#[tokio::test]
async fn classify_blank_url_is_400() {
    let app = create_test_app("");

    let response = app
        .server
        .post("/v1/classify")
        .json(&json!({ "url": "   ", "model": "Decision Tree" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
