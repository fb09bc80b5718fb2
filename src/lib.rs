// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含分类用例与请求/响应数据传输对象
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含特征向量、抓取结果、分类结论等核心模型以及特征提取服务
pub mod domain;

/// 引擎模块
///
/// 实现页面抓取、DNS 解析与流量排名查询
pub mod engines;

/// 基础设施模块
///
/// 提供模型文件加载与推理后端
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和处理器
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
