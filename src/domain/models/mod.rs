// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 特征向量（feature_vector）：模型统一的 14 维输入
/// - 抓取结果（fetched_content）：单次请求的页面与辅助信号
/// - 模型特质（phishing_model）：异构模型后端的统一预测接口
/// - 分类结论（verdict）：合法 / 钓鱼二值结果
pub mod feature_vector;
pub mod fetched_content;
pub mod phishing_model;
pub mod verdict;
