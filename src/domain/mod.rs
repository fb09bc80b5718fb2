// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：特征向量、抓取结果、模型接口与分类结论
/// - 服务（services）：特征提取等纯业务规则
///
/// 领域层是系统的核心，不依赖于任何外部实现。
pub mod models;
pub mod services;
