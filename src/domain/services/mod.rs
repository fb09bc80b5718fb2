// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务：
/// - 特征提取（feature_extractor）：由 URL 与页面内容计算特征向量
/// - 短链接服务（shortening_services）：已知短链接域名清单
///
/// 领域服务不做任何 I/O，输入相同则输出相同。
pub mod feature_extractor;
pub mod shortening_services;
