// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::Json;
use serde::Serialize;

use crate::domain::models::feature_vector::FEATURE_NAMES;
use crate::infrastructure::models::registry::KNOWN_MODELS;

/// 数据集规模
#[derive(Debug, Serialize)]
pub struct DatasetDetails {
    pub sources: [&'static str; 2],
    pub total: u32,
    pub legitimate: u32,
    pub phishing: u32,
}

/// 项目说明
#[derive(Debug, Serialize)]
pub struct ProjectDetails {
    pub title: &'static str,
    pub approach: &'static str,
    pub dataset: DatasetDetails,
    pub features: [&'static str; 14],
    pub models: [&'static str; 6],
}

/// 项目说明端点
pub async fn about() -> Json<ProjectDetails> {
    Json(ProjectDetails {
        title: "Phishing Website Detection using Machine Learning",
        approach: "Supervised learning on content-based features: the HTML of the page, \
                   redirect behaviour and domain signals are turned into a fixed feature \
                   vector and classified by models trained with scikit-learn.",
        dataset: DatasetDetails {
            sources: ["phishtank.org", "tranco-list.eu"],
            total: 26584,
            legitimate: 16060,
            phishing: 10524,
        },
        features: FEATURE_NAMES,
        models: KNOWN_MODELS,
    })
}
