// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use phishrs::application::use_cases::classify_use_case::ClassifyUseCase;
use phishrs::config::settings::Settings;
use phishrs::engines::fetch_engine::FetchEngine;
use phishrs::infrastructure::models::registry::ModelRegistry;
use phishrs::presentation::routes;
use phishrs::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting phishrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Load models once; the registry is read-only from here on
    let (registry, report) =
        ModelRegistry::load(&settings.models.directory, &settings.model_load_options());
    if registry.is_empty() {
        warn!(
            directory = %settings.models.directory,
            "No models loaded; classification requests will be rejected"
        );
    } else if !report.is_complete() {
        warn!(
            loaded = ?report.loaded,
            missing = report.failures.len(),
            "Running with a partial model set"
        );
    }
    let registry = Arc::new(registry);

    // 4. Initialize fetch engine
    let fetcher = Arc::new(FetchEngine::new(settings.fetch_config()));
    info!("Fetch engine initialized");

    // 5. Start HTTP server
    let use_case = ClassifyUseCase::new(registry, fetcher);
    let app = routes::routes(use_case);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
