// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::TestServer;
use phishrs::application::use_cases::classify_use_case::ClassifyUseCase;
use phishrs::domain::models::fetched_content::{FetchedContent, TrafficRank};
use phishrs::engines::traits::ContentFetcher;
use phishrs::infrastructure::models::registry::ModelRegistry;
use phishrs::presentation::routes;
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 返回固定页面的抓取器
pub struct StaticFetcher {
    pub html: String,
    pub calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn new(html: &str) -> Self {
        Self {
            html: html.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> FetchedContent {
        self.calls.fetch_add(1, Ordering::SeqCst);
        FetchedContent {
            final_url: url.to_string(),
            html: self.html.clone(),
            redirect_count: 0,
            external_redirect_count: 0,
            dns_resolved: true,
            traffic_rank: TrafficRank::Known(5000),
            degraded: Vec::new(),
        }
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// 写入一个常量输出的树模型
pub fn write_constant_model(dir: &Path, file_name: &str, label: f64) {
    let raw = json!({
        "format": "tree_ensemble",
        "n_features": 14,
        "trees": [{ "nodes": [{ "value": label }] }]
    });
    fs::write(dir.join(file_name), raw.to_string()).unwrap();
}

/// 写入一个按 iframe 特征判断的决策树：有 iframe 判为钓鱼
pub fn write_iframe_tree(dir: &Path, file_name: &str) {
    let raw = json!({
        "format": "tree_ensemble",
        "n_features": 14,
        "trees": [{ "nodes": [
            { "feature": 9, "threshold": 0.5, "left": 1, "right": 2 },
            { "value": 0.0 },
            { "value": 1.0 }
        ]}]
    });
    fs::write(dir.join(file_name), raw.to_string()).unwrap();
}

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub fetcher: Arc<StaticFetcher>,
    pub model_dir: tempfile::TempDir,
}

/// 使用临时模型目录和固定抓取器构建测试服务
pub fn create_test_app(html: &str) -> TestApp {
    let model_dir = tempfile::TempDir::new().unwrap();
    write_constant_model(model_dir.path(), "Decision_Tree_model.json", 0.0);
    write_constant_model(model_dir.path(), "Random_Forest_model.json", 1.0);
    write_iframe_tree(model_dir.path(), "XGBoost_model.json");

    let (registry, _report) = ModelRegistry::load(model_dir.path(), &Default::default());
    let fetcher = Arc::new(StaticFetcher::new(html));
    let use_case = ClassifyUseCase::new(Arc::new(registry), fetcher.clone());

    let server = TestServer::new(routes::routes(use_case)).unwrap();

    TestApp {
        server,
        fetcher,
        model_dir,
    }
}
