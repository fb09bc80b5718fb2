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

use crate::application::use_cases::classify_use_case::ClassificationOutcome;
use crate::domain::models::{
    feature_vector::FeatureVector, fetched_content::DegradedSignal, verdict::Verdict,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 分类响应数据传输对象
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResponseDto {
    /// 分类结论
    pub verdict: Verdict,
    /// 使用的模型
    pub model: String,
    /// 面向用户的提示信息
    pub message: String,
    /// 提取出的特征向量
    pub features: FeatureVector,
    /// 降级的抓取信号
    pub degraded: Vec<DegradedSignal>,
}

impl From<ClassificationOutcome> for ClassifyResponseDto {
    fn from(outcome: ClassificationOutcome) -> Self {
        Self {
            message: outcome.verdict.message().to_string(),
            verdict: outcome.verdict,
            model: outcome.model,
            features: outcome.features,
            degraded: outcome.degraded,
        }
    }
}

/// 模型列表响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelListDto {
    pub models: BTreeSet<String>,
}
