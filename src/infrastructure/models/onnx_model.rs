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
use crate::domain::models::phishing_model::{InferenceError, PhishingModel};
use crate::infrastructure::models::ModelLoadError;
use ndarray::Array2;
use once_cell::sync::OnceCell;
use ort::environment::Environment;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{Outlet, Tensor};
use parking_lot::Mutex;
use std::path::Path;

// ONNX Runtime allows a single environment per process
static ENVIRONMENT: OnceCell<Environment> = OnceCell::new();

fn environment() -> Result<&'static Environment, ModelLoadError> {
    ENVIRONMENT.get_or_try_init(|| {
        ort::init()
            .with_name("phishrs")
            .build()
            .map_err(|e| ModelLoadError::Backend(e.to_string()))
    })
}

/// ONNX 模型
///
/// 通过 ONNX Runtime 加载 scikit-learn / XGBoost / Keras 导出的分类器。
/// 输入为形状 `[1, 14]` 的 f32 张量；输出可以是 int64 类别标签，
/// 也可以是 f32 概率（单列按 0.5 阈值，多列取最大值下标）。
pub struct OnnxModel {
    // Session::run needs exclusive access
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

impl OnnxModel {
    /// 从文件加载 ONNX 模型
    ///
    /// 加载时校验图中确实存在配置的输入与输出张量名称。
    ///
    /// # 参数
    ///
    /// * `path` - 模型文件路径
    /// * `input_name` - 输入张量名称
    /// * `output_name` - 输出张量名称
    pub fn load(path: &Path, input_name: &str, output_name: &str) -> Result<Self, ModelLoadError> {
        let session = Session::builder(environment()?)
            .map_err(|e| ModelLoadError::Backend(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelLoadError::Backend(e.to_string()))?
            .commit_from_file(path)
            .map_err(|e| ModelLoadError::Backend(e.to_string()))?;

        ensure_outlet("input", input_name, session.inputs())?;
        ensure_outlet("output", output_name, session.outputs())?;

        Ok(Self {
            session: Mutex::new(session),
            input_name: input_name.to_string(),
            output_name: output_name.to_string(),
        })
    }
}

fn ensure_outlet(kind: &str, name: &str, outlets: &[Outlet]) -> Result<(), ModelLoadError> {
    if outlets.iter().any(|outlet| outlet.name() == name) {
        return Ok(());
    }
    let available: Vec<&str> = outlets.iter().map(|outlet| outlet.name()).collect();
    Err(ModelLoadError::Invalid(format!(
        "graph has no {} named '{}' (available: {})",
        kind,
        name,
        available.join(", ")
    )))
}

impl PhishingModel for OnnxModel {
    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        let values = features.to_vec();
        let input = Array2::from_shape_vec((1, values.len()), values)
            .map_err(|e| InferenceError::Backend(e.to_string()))?;
        let tensor = Tensor::from_array(input).map_err(|e| InferenceError::Backend(e.to_string()))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => tensor])
            .map_err(|e| InferenceError::Backend(e.to_string()))?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            InferenceError::InvalidOutput(format!("no output named '{}'", self.output_name))
        })?;

        if let Ok(labels) = output.try_extract_array::<i64>() {
            return labels
                .iter()
                .next()
                .copied()
                .ok_or_else(|| InferenceError::InvalidOutput("empty label tensor".to_string()));
        }

        let scores = output
            .try_extract_array::<f32>()
            .map_err(|e| InferenceError::InvalidOutput(e.to_string()))?;
        let scores: Vec<f32> = scores.iter().copied().collect();

        match scores.len() {
            0 => Err(InferenceError::InvalidOutput("empty score tensor".to_string())),
            1 => Ok(i64::from(scores[0] > 0.5)),
            _ => scores
                .iter()
                .enumerate()
                .filter(|(_, s)| s.is_finite())
                .max_by(|(_, a), (_, b)| a.total_cmp(b))
                .map(|(i, _)| i as i64)
                .ok_or_else(|| InferenceError::InvalidOutput("non-finite scores".to_string())),
        }
    }

    fn backend(&self) -> &'static str {
        "onnx"
    }
}

#[cfg(test)]
#[path = "onnx_model_test.rs"]
mod tests;
