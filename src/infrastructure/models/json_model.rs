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

use crate::domain::models::feature_vector::{FeatureVector, FEATURE_COUNT};
use crate::domain::models::phishing_model::{InferenceError, PhishingModel};
use crate::infrastructure::models::ModelLoadError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// JSON 模型文件
///
/// 训练流水线导出的轻量格式，按 `format` 字段区分：
/// - `tree_ensemble`：决策树 / 随机森林 / 梯度提升树
/// - `linear`：线性决策函数（线性 SVM、逻辑回归）
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum JsonModel {
    /// 树模型集成
    TreeEnsemble(TreeEnsemble),
    /// 线性模型
    Linear(LinearModel),
}

/// 树集成的聚合方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// 叶子值为钓鱼概率（或 0/1 标签），取平均后与 0.5 比较
    #[default]
    Mean,
    /// 叶子值为 margin，求和加 `base_score` 后过 sigmoid
    Logistic,
}

/// 树模型集成
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    /// 输入特征数
    pub n_features: usize,
    /// 聚合方式
    #[serde(default)]
    pub aggregation: Aggregation,
    /// 初始 margin（仅 logistic）
    #[serde(default)]
    pub base_score: f64,
    /// 树列表
    pub trees: Vec<Tree>,
}

/// 单棵树，节点按数组存储，根节点下标为 0
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

/// 树节点
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// 分裂节点：`x[feature] <= threshold` 走左子树
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    /// 叶子节点
    Leaf { value: f64 },
}

/// 特征标准化参数
#[derive(Debug, Clone, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// 线性模型：`w · scale(x) + intercept > 0` 判为钓鱼
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub n_features: usize,
    pub weights: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<Scaler>,
}

impl JsonModel {
    /// 从文件加载并校验
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// 从 JSON 字符串解析并校验
    pub fn from_json(raw: &str) -> Result<Self, ModelLoadError> {
        let model: JsonModel =
            serde_json::from_str(raw).map_err(|e| ModelLoadError::Parse(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    fn n_features(&self) -> usize {
        match self {
            JsonModel::TreeEnsemble(m) => m.n_features,
            JsonModel::Linear(m) => m.n_features,
        }
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        if self.n_features() != FEATURE_COUNT {
            return Err(ModelLoadError::FeatureCount {
                expected: FEATURE_COUNT,
                actual: self.n_features(),
            });
        }

        match self {
            JsonModel::TreeEnsemble(ensemble) => ensemble.validate(),
            JsonModel::Linear(linear) => linear.validate(),
        }
    }
}

impl TreeEnsemble {
    fn validate(&self) -> Result<(), ModelLoadError> {
        if self.trees.is_empty() {
            return Err(ModelLoadError::Invalid("ensemble has no trees".to_string()));
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelLoadError::Invalid(format!("tree {} is empty", t)));
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                if let Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= self.n_features {
                        return Err(ModelLoadError::Invalid(format!(
                            "tree {} node {} splits on feature {}",
                            t, i, feature
                        )));
                    }
                    // Children always come after their parent, so traversal terminates
                    for child in [*left, *right] {
                        if child <= i || child >= tree.nodes.len() {
                            return Err(ModelLoadError::Invalid(format!(
                                "tree {} node {} has invalid child {}",
                                t, i, child
                            )));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn predict(&self, x: &[f32]) -> i64 {
        let total: f64 = self.trees.iter().map(|tree| tree.evaluate(x)).sum();

        let phishing = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64 > 0.5,
            Aggregation::Logistic => sigmoid(total + self.base_score) > 0.5,
        };
        i64::from(phishing)
    }
}

impl Tree {
    fn evaluate(&self, x: &[f32]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if x[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

impl LinearModel {
    fn validate(&self) -> Result<(), ModelLoadError> {
        if self.weights.len() != self.n_features {
            return Err(ModelLoadError::Invalid(format!(
                "expected {} weights, got {}",
                self.n_features,
                self.weights.len()
            )));
        }

        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != self.n_features || scaler.scale.len() != self.n_features {
                return Err(ModelLoadError::Invalid(
                    "scaler length does not match feature count".to_string(),
                ));
            }
            if scaler.scale.iter().any(|s| *s == 0.0) {
                return Err(ModelLoadError::Invalid("scaler has zero scale".to_string()));
            }
        }

        Ok(())
    }

    fn decision(&self, x: &[f32]) -> f64 {
        let dot: f64 = x
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let value = f64::from(*value);
                let scaled = match &self.scaler {
                    Some(scaler) => (value - scaler.mean[i]) / scaler.scale[i],
                    None => value,
                };
                scaled * self.weights[i]
            })
            .sum();
        dot + self.intercept
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl PhishingModel for JsonModel {
    fn predict(&self, features: &FeatureVector) -> Result<i64, InferenceError> {
        let x = features.to_vec();
        if x.len() != self.n_features() {
            return Err(InferenceError::ShapeMismatch {
                expected: self.n_features(),
                actual: x.len(),
            });
        }
        if let Some(i) = x.iter().position(|v| !v.is_finite()) {
            return Err(InferenceError::InvalidInput(format!(
                "non-finite input at position {}",
                i
            )));
        }

        match self {
            JsonModel::TreeEnsemble(ensemble) => Ok(ensemble.predict(&x)),
            JsonModel::Linear(linear) => {
                let decision = linear.decision(&x);
                if !decision.is_finite() {
                    return Err(InferenceError::InvalidOutput(format!(
                        "decision function returned {}",
                        decision
                    )));
                }
                Ok(i64::from(decision > 0.0))
            }
        }
    }

    fn backend(&self) -> &'static str {
        match self {
            JsonModel::TreeEnsemble(_) => "json-tree-ensemble",
            JsonModel::Linear(_) => "json-linear",
        }
    }
}
