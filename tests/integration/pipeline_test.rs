// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{write_constant_model, write_iframe_tree};
use axum::{
    http::header::LOCATION,
    response::{IntoResponse, Redirect},
    routing::get,
    Router,
};
use phishrs::application::use_cases::classify_use_case::{ClassifyError, ClassifyUseCase};
use phishrs::domain::models::fetched_content::DegradedSignal;
use phishrs::domain::models::verdict::Verdict;
use phishrs::engines::fetch_engine::FetchEngine;
use phishrs::engines::traits::FetchConfig;
use phishrs::infrastructure::models::registry::{ModelLoadOptions, ModelRegistry};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn start_site() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let app = Router::new()
        .route(
            "/login",
            get(|| async {
                axum::response::Html(
                    "<html><body><iframe src='x'></iframe>\
                     <script>document.oncontextmenu = function() { return false; }</script>\
                     </body></html>",
                )
            }),
        )
        .route("/start", get(|| async { Redirect::temporary("/login") }))
        .route(
            "/away",
            get(move || async move {
                (
                    axum::http::StatusCode::FOUND,
                    [(LOCATION, format!("http://127.0.0.1:{}/login", port))],
                )
                    .into_response()
            }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    port
}

fn registry() -> (Arc<ModelRegistry>, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().unwrap();
    write_iframe_tree(dir.path(), "Decision_Tree_model.json");
    write_constant_model(dir.path(), "Random_Forest_model.json", 0.0);

    let (registry, report) = ModelRegistry::load(dir.path(), &ModelLoadOptions::default());
    assert_eq!(report.loaded.len(), 2);
    (Arc::new(registry), dir)
}

fn fetch_config(rank_endpoint: Option<String>) -> FetchConfig {
    FetchConfig {
        page_timeout: Duration::from_secs(3),
        dns_timeout: Duration::from_secs(2),
        rank_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
        traffic_rank_endpoint: rank_endpoint,
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn classify_live_page_end_to_end() {
    let port = start_site().await;
    let (registry, _dir) = registry();

    let rank_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ranks/domain/localhost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "domain": "localhost",
            "ranks": [{ "date": "2025-01-01", "rank": 321 }]
        })))
        .mount(&rank_server)
        .await;

    let fetcher = Arc::new(FetchEngine::new(fetch_config(Some(rank_server.uri()))));
    let use_case = ClassifyUseCase::new(registry, fetcher);

    let url = format!("http://localhost:{}/start", port);
    let outcome = use_case
        .classify_detailed(&url, "Decision Tree")
        .await
        .unwrap();

    assert_eq!(outcome.verdict, Verdict::Phishing);
    assert!(outcome.degraded.is_empty());

    let features = outcome.features;
    assert_eq!(features.iframe, 1.0);
    assert_eq!(features.right_clic, 1.0);
    assert_eq!(features.nb_redirection, 1.0);
    assert_eq!(features.nb_external_redirection, 0.0);
    assert_eq!(features.web_traffic, 321.0);
    assert_eq!(features.dns_record, 0.0);
    assert_eq!(features.length_url, url.chars().count() as f32);
}

#[tokio::test]
async fn external_redirect_is_counted() {
    let port = start_site().await;
    let (registry, _dir) = registry();
    let use_case = ClassifyUseCase::new(registry, Arc::new(FetchEngine::new(fetch_config(None))));

    // localhost -> 127.0.0.1 changes the registrable domain
    let outcome = use_case
        .classify_detailed(&format!("http://localhost:{}/away", port), "Random Forest")
        .await
        .unwrap();

    assert_eq!(outcome.verdict, Verdict::Legitimate);
    assert_eq!(outcome.features.nb_redirection, 1.0);
    assert_eq!(outcome.features.nb_external_redirection, 1.0);
    assert_eq!(outcome.features.iframe, 1.0);
}

#[tokio::test]
async fn unreachable_site_still_classifies() {
    let (registry, _dir) = registry();
    let use_case = ClassifyUseCase::new(registry, Arc::new(FetchEngine::new(fetch_config(None))));

    let outcome = use_case
        .classify_detailed("http://127.0.0.1:1/login", "Decision Tree")
        .await
        .unwrap();

    assert_eq!(outcome.verdict, Verdict::Legitimate);
    assert_eq!(outcome.degraded, vec![DegradedSignal::Page]);
    assert_eq!(outcome.features.ip, 1.0);
    assert_eq!(outcome.features.iframe, 0.0);
}

#[tokio::test]
async fn slow_site_is_bounded_by_request_timeout() {
    let port = start_site().await;
    let (registry, _dir) = registry();
    let fetcher = FetchEngine::new(FetchConfig {
        request_timeout: Duration::from_millis(300),
        ..fetch_config(None)
    });
    let use_case = ClassifyUseCase::new(registry, Arc::new(fetcher));

    let started = std::time::Instant::now();
    let outcome = use_case
        .classify_detailed(&format!("http://127.0.0.1:{}/slow", port), "Decision Tree")
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(outcome.degraded, vec![DegradedSignal::Page]);
    assert_eq!(outcome.features.nb_redirection, 0.0);
    assert_eq!(outcome.features.ip, 1.0);
    // The IP literal counts as resolved even though the page missed the deadline
    assert_eq!(outcome.features.dns_record, 0.0);
}

#[tokio::test]
async fn unknown_model_performs_no_network_io() {
    let (registry, _dir) = registry();
    let rank_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&rank_server)
        .await;

    let fetcher = Arc::new(FetchEngine::new(fetch_config(Some(rank_server.uri()))));
    let use_case = ClassifyUseCase::new(registry, fetcher);

    let err = use_case
        .classify("http://localhost/", "Nonexistent Model")
        .await
        .unwrap_err();

    assert!(matches!(err, ClassifyError::ModelNotFound(_)));
    rank_server.verify().await;
}
