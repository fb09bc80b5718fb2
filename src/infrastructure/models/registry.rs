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
use crate::domain::models::phishing_model::{ModelHandle, PhishingModel};
use crate::infrastructure::models::json_model::JsonModel;
use crate::infrastructure::models::ModelLoadError;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// 已知模型名称（固定集合）
pub const KNOWN_MODELS: [&str; 6] = [
    "Decision Tree",
    "Random Forest",
    "Multilayer Perceptrons",
    "XGBoost",
    "SVM",
    "AutoEncoder",
];

/// 模型文件名后缀：`<ModelName>_model.<ext>`
pub const ARTIFACT_SUFFIX: &str = "_model";

/// 支持的扩展名，按优先级排列
const SUPPORTED_EXTENSIONS: [&str; 2] = ["onnx", "json"];

/// 注册表错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// 模型不存在
    #[error("Model not found: {0}")]
    NotFound(String),
}

/// 模型加载选项
#[derive(Debug, Clone)]
pub struct ModelLoadOptions {
    /// ONNX 输入张量名称
    pub onnx_input: String,
    /// ONNX 输出张量名称
    pub onnx_output: String,
}

impl Default for ModelLoadOptions {
    fn default() -> Self {
        Self {
            onnx_input: "float_input".to_string(),
            onnx_output: "output_label".to_string(),
        }
    }
}

/// 加载报告
#[derive(Debug, Default)]
pub struct LoadReport {
    /// 加载成功的模型
    pub loaded: Vec<String>,
    /// 加载失败的模型及原因
    pub failures: Vec<(String, ModelLoadError)>,
}

impl LoadReport {
    /// 是否全部加载成功
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 由文件名推导模型名称
///
/// 去掉扩展名与 `_model` 后缀，下划线与连字符替换为空格：
/// `Random_Forest_model.json` → `Random Forest`。
pub fn normalize_artifact_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    let stem = stem.strip_suffix(ARTIFACT_SUFFIX).unwrap_or(stem);

    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 模型注册表
///
/// 启动时从目录加载固定集合中的模型，之后不可变，可被任意多个请求并发只读访问。
/// 缺失或损坏的模型逐个报告，注册表以降级模式仅暴露加载成功的模型。
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, ModelHandle>,
}

impl ModelRegistry {
    /// 从目录加载模型
    ///
    /// # 参数
    ///
    /// * `directory` - 模型目录
    /// * `options` - 加载选项
    ///
    /// # 返回值
    ///
    /// 注册表与加载报告；本函数不会失败
    pub fn load(directory: impl AsRef<Path>, options: &ModelLoadOptions) -> (Self, LoadReport) {
        let directory = directory.as_ref();
        let artifacts = scan_directory(directory);

        let mut models = HashMap::new();
        let mut report = LoadReport::default();

        for name in KNOWN_MODELS {
            let result = match artifacts.get(&name.to_lowercase()) {
                Some(candidates) => load_first(candidates, options),
                None => Err(ModelLoadError::Missing(
                    directory
                        .join(format!("{}{}.<ext>", name, ARTIFACT_SUFFIX))
                        .display()
                        .to_string(),
                )),
            };

            match result {
                Ok((path, model)) => {
                    info!(model = name, backend = model.backend(), path = %path.display(), "Model loaded");
                    models.insert(name.to_string(), ModelHandle::new(name, model));
                    report.loaded.push(name.to_string());
                }
                Err(e) => {
                    warn!(model = name, error = %e, "Model unavailable");
                    report.failures.push((name.to_string(), e));
                }
            }
        }

        info!(
            directory = %directory.display(),
            loaded = report.loaded.len(),
            failed = report.failures.len(),
            "Model registry initialized"
        );

        (Self { models }, report)
    }

    /// 由内存中的模型构建注册表
    pub fn from_models<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = (S, Arc<dyn PhishingModel>)>,
        S: Into<String>,
    {
        let models = models
            .into_iter()
            .map(|(name, model)| {
                let name = name.into();
                (name.clone(), ModelHandle::new(name, model))
            })
            .collect();
        Self { models }
    }

    /// 按名称获取模型
    pub fn get(&self, name: &str) -> Result<ModelHandle, RegistryError> {
        self.models
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// 是否包含模型
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// 已加载的模型名称
    pub fn names(&self) -> BTreeSet<String> {
        self.models.keys().cloned().collect()
    }

    /// 已加载模型数量
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// 扫描目录，按规范化名称（小写）分组模型文件
fn scan_directory(directory: &Path) -> HashMap<String, Vec<PathBuf>> {
    let mut artifacts: HashMap<String, Vec<PathBuf>> = HashMap::new();

    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(directory = %directory.display(), error = %e, "Cannot read model directory");
            return artifacts;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name
            .rsplit_once('.')
            .is_some_and(|(stem, _)| stem.ends_with(ARTIFACT_SUFFIX))
        {
            debug!(file = file_name, "Skipping non-artifact file");
            continue;
        }

        let name = normalize_artifact_name(file_name).to_lowercase();
        artifacts.entry(name).or_default().push(path);
    }

    for candidates in artifacts.values_mut() {
        candidates.sort_by_key(|path| extension_priority(path));
    }

    artifacts
}

fn extension_priority(path: &Path) -> usize {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .position(|s| s.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(SUPPORTED_EXTENSIONS.len())
}

/// 按优先级尝试加载候选文件，返回第一个成功的
fn load_first(
    candidates: &[PathBuf],
    options: &ModelLoadOptions,
) -> Result<(PathBuf, Arc<dyn PhishingModel>), ModelLoadError> {
    let mut last_error = None;
    for path in candidates {
        match load_artifact(path, options) {
            Ok(model) => return Ok((path.clone(), model)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Artifact rejected");
                last_error = Some(e);
            }
        }
    }
    Err(last_error.unwrap_or_else(|| ModelLoadError::Missing("no candidates".to_string())))
}

/// 加载单个模型文件并做一次冒烟预测
fn load_artifact(
    path: &Path,
    options: &ModelLoadOptions,
) -> Result<Arc<dyn PhishingModel>, ModelLoadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let model: Arc<dyn PhishingModel> = match extension.as_str() {
        "json" => Arc::new(JsonModel::load(path)?),
        #[cfg(feature = "onnx")]
        "onnx" => Arc::new(crate::infrastructure::models::onnx_model::OnnxModel::load(
            path,
            &options.onnx_input,
            &options.onnx_output,
        )?),
        other => return Err(ModelLoadError::Unsupported(other.to_string())),
    };

    smoke_check(model.as_ref())?;

    #[cfg(not(feature = "onnx"))]
    let _ = options;

    Ok(model)
}

/// 用全零特征向量做一次预测
///
/// 无法对全零向量给出结果的模型不接受 14 字段输入；
/// 预测过程中的 panic 同样视为模型无效，不会中断其余模型的加载。
fn smoke_check(model: &dyn PhishingModel) -> Result<(), ModelLoadError> {
    let features = FeatureVector::default();
    match panic::catch_unwind(AssertUnwindSafe(|| model.predict(&features))) {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(e)) => Err(ModelLoadError::Invalid(format!(
            "smoke prediction failed: {}",
            e
        ))),
        Err(_) => Err(ModelLoadError::Invalid(
            "smoke prediction panicked".to_string(),
        )),
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
