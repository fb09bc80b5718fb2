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

use crate::{
    domain::{
        models::{
            feature_vector::{FeatureVector, FEATURE_COUNT},
            fetched_content::DegradedSignal,
            phishing_model::InferenceError,
            verdict::Verdict,
        },
        services::feature_extractor::FeatureExtractor,
    },
    engines::traits::ContentFetcher,
    infrastructure::models::registry::{ModelRegistry, RegistryError},
};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// 分类错误
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// 注册表中没有该名称的模型，此时不会发生任何抓取
    #[error("Model not found: {0}")]
    ModelNotFound(String),
    /// 特征向量长度或取值域不符合 14 字段契约
    #[error("Feature contract violated (expected {expected} fields, got {actual}): {detail}")]
    FeatureContractViolation {
        /// 契约要求的字段数
        expected: usize,
        /// 实际字段数
        actual: usize,
        /// 违规说明
        detail: String,
    },
    /// 模型推理失败
    #[error("Model '{model}' failed to predict: {source}")]
    Inference {
        /// 失败的模型名称
        model: String,
        /// 底层推理错误
        #[source]
        source: InferenceError,
    },
    /// 请求参数无效（如去除首尾空白后 URL 为空）
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<RegistryError> for ClassifyError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(name) => ClassifyError::ModelNotFound(name),
        }
    }
}

/// 一次分类的完整结果
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    /// 归一化后的结论
    pub verdict: Verdict,
    /// 使用的模型名称
    pub model: String,
    /// 送入模型的特征向量
    pub features: FeatureVector,
    /// 抓取阶段降级的信号，按 Page、Dns、TrafficRank 顺序
    pub degraded: Vec<DegradedSignal>,
}

/// 分类用例
///
/// 按固定顺序编排一次分类：校验模型名 → 抓取 → 提取特征 → 预测 → 映射结论。
/// 模型名不存在时在任何网络 I/O 之前返回错误；抓取失败只会降级，不会中断分类。
pub struct ClassifyUseCase<F> {
    registry: Arc<ModelRegistry>,
    fetcher: Arc<F>,
}

impl<F> Clone for ClassifyUseCase<F> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            fetcher: self.fetcher.clone(),
        }
    }
}

impl<F> ClassifyUseCase<F>
where
    F: ContentFetcher + 'static,
{
    pub fn new(registry: Arc<ModelRegistry>, fetcher: Arc<F>) -> Self {
        Self { registry, fetcher }
    }

    /// 已加载的模型名称
    pub fn list_model_names(&self) -> BTreeSet<String> {
        self.registry.names()
    }

    /// 对 URL 进行分类
    ///
    /// # 参数
    ///
    /// * `url` - 待检测的网站 URL
    /// * `model_name` - 注册表中的模型名称
    ///
    /// # 返回值
    ///
    /// * `Ok(Verdict)` - 分类结论
    /// * `Err(ClassifyError)` - 模型不存在、特征契约被破坏或推理失败
    pub async fn classify(&self, url: &str, model_name: &str) -> Result<Verdict, ClassifyError> {
        self.classify_detailed(url, model_name)
            .await
            .map(|outcome| outcome.verdict)
    }

    /// 对 URL 进行分类，并返回特征向量与降级信息
    ///
    /// 先按名称查找模型，再对 URL 去除首尾空白；之后的抓取与特征提取
    /// 均基于去除空白后的 URL，因此 `length_url` 不计入首尾空白。
    pub async fn classify_detailed(
        &self,
        url: &str,
        model_name: &str,
    ) -> Result<ClassificationOutcome, ClassifyError> {
        // 1. Resolve the model before any validation or I/O
        let model = self.registry.get(model_name)?;

        let url = url.trim();
        if url.is_empty() {
            return Err(ClassifyError::InvalidInput("url must not be empty".to_string()));
        }

        // 2. Fetch; failures come back as degraded content
        let content = self.fetcher.fetch(url).await;

        // 3. Extract and check the fixed feature contract
        let features = FeatureExtractor::extract(url, &content);
        check_contract(&features)?;

        // 4. Predict on the feature vector
        let raw = model
            .predict(&features)
            .map_err(|source| ClassifyError::Inference {
                model: model.name().to_string(),
                source,
            })?;

        // 5. Normalize the raw label
        let verdict = Verdict::from_raw(raw);

        info!(
            url = %url,
            fetcher = self.fetcher.name(),
            model = model.name(),
            backend = model.backend(),
            raw_label = raw,
            verdict = %verdict,
            degraded = ?content.degraded,
            "Classification completed"
        );

        Ok(ClassificationOutcome {
            verdict,
            model: model.name().to_string(),
            features,
            degraded: content.degraded,
        })
    }
}

fn check_contract(features: &FeatureVector) -> Result<(), ClassifyError> {
    let values = features.to_vec();
    if values.len() != FEATURE_COUNT {
        error!(actual = values.len(), "Feature vector has wrong length");
        return Err(ClassifyError::FeatureContractViolation {
            expected: FEATURE_COUNT,
            actual: values.len(),
            detail: "wrong number of fields".to_string(),
        });
    }

    let violations = features.contract_violations();
    if !violations.is_empty() {
        error!(fields = ?violations, "Feature vector holds out-of-domain values");
        return Err(ClassifyError::FeatureContractViolation {
            expected: FEATURE_COUNT,
            actual: values.len(),
            detail: format!("out-of-domain values in {}", violations.join(", ")),
        });
    }

    Ok(())
}

#[cfg(test)]
#[path = "classify_use_case_test.rs"]
mod tests;
