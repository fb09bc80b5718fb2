// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，提供对具体技术的抽象和封装。
///
/// 包含的子模块：
/// - 模型（models）：模型文件的加载、各推理后端以及只读的模型注册表
///
/// 基础设施层依赖于领域层的抽象接口（`PhishingModel`），
/// 确保领域层保持纯粹的业务逻辑，不受推理后端的影响。
pub mod models;
