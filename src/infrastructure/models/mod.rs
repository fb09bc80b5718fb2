// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

/// 模型后端与注册表
///
/// - JSON 模型（json_model）：内置的树集成与线性模型格式
/// - ONNX 模型（onnx_model）：通过 ONNX Runtime 推理，需要 `onnx` 特性
/// - 注册表（registry）：启动时加载、之后只读的模型集合
pub mod json_model;
#[cfg(feature = "onnx")]
pub mod onnx_model;
#[cfg(all(test, feature = "onnx"))]
pub(crate) mod onnx_fixtures;
pub mod registry;

/// 模型加载错误
///
/// 按模型逐个报告，不会中断其他模型的加载。
#[derive(Error, Debug)]
pub enum ModelLoadError {
    /// 模型文件不存在
    #[error("Artifact not found: {0}")]
    Missing(String),
    /// 读取失败
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 文件格式无法解析
    #[error("Parse error: {0}")]
    Parse(String),
    /// 不支持的文件类型
    #[error("Unsupported artifact type: {0}")]
    Unsupported(String),
    /// 输入维度与特征向量不符
    #[error("Feature count mismatch: expected {expected}, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    /// 模型内容无效
    #[error("Invalid artifact: {0}")]
    Invalid(String),
    /// 推理后端错误
    #[error("Backend error: {0}")]
    Backend(String),
}
