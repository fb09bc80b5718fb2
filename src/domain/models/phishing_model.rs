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

use crate::domain::models::feature_vector::FeatureVector;
use std::sync::Arc;
use thiserror::Error;

/// 推理错误类型
#[derive(Error, Debug)]
pub enum InferenceError {
    /// 输入维度与模型不符
    #[error("Feature shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    /// 输入包含模型无法处理的值（如 NaN、无穷大）
    #[error("Invalid model input: {0}")]
    InvalidInput(String),
    /// 模型输出无法解析为标签
    #[error("Invalid model output: {0}")]
    InvalidOutput(String),
    /// 推理后端错误
    #[error("Backend error: {0}")]
    Backend(String),
}

/// 钓鱼检测模型特质
///
/// 所有后端统一接受 14 维 [`FeatureVector`]，返回原始类别标签。
/// 形状变换、类型转换等后端细节由各实现自行处理。
pub trait PhishingModel: Send + Sync {
    /// 执行预测，返回原始标签（0 表示合法）
    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError>;

    /// 后端名称
    fn backend(&self) -> &'static str;
}

/// 已加载的模型句柄
///
/// 由注册表独占持有，所有请求共享只读引用。
#[derive(Clone)]
pub struct ModelHandle {
    name: String,
    model: Arc<dyn PhishingModel>,
}

impl ModelHandle {
    /// 创建模型句柄
    pub fn new(name: impl Into<String>, model: Arc<dyn PhishingModel>) -> Self {
        Self {
            name: name.into(),
            model,
        }
    }

    /// 模型名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 后端名称
    pub fn backend(&self) -> &'static str {
        self.model.backend()
    }

    /// 执行预测
    pub fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        self.model.predict(features)
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("name", &self.name)
            .field("backend", &self.model.backend())
            .finish()
    }
}
