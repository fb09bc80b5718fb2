// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::use_cases::classify_use_case::ClassifyUseCase;
use crate::engines::traits::ContentFetcher;
use crate::presentation::handlers::{about_handler, classify_handler};
use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `use_case` - 分类用例，所有请求共享同一个只读注册表
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes<F>(use_case: ClassifyUseCase<F>) -> Router
where
    F: ContentFetcher + 'static,
{
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/v1/about", get(about_handler::about));

    let classify_routes = Router::new()
        .route("/v1/models", get(classify_handler::list_models::<F>))
        .route("/v1/classify", post(classify_handler::classify::<F>))
        .layer(Extension(use_case));

    Router::new()
        .merge(public_routes)
        .merge(classify_routes)
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
