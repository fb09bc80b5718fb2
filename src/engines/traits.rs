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

use crate::domain::models::fetched_content::FetchedContent;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// 默认 User-Agent
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; phishrs/0.1)";

/// 默认流量排名服务地址（Tranco list API）
pub const DEFAULT_TRAFFIC_RANK_ENDPOINT: &str = "https://tranco-list.eu/api";

/// 引擎错误类型
///
/// 只在抓取器内部流转，最终被吸收为降级信号，不会传递给调用方。
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// URL 无效
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// DNS 解析失败
    #[error("DNS lookup failed: {0}")]
    Dns(String),
}

impl EngineError {
    /// 是否为超时导致的失败
    pub fn is_timeout(&self) -> bool {
        match self {
            EngineError::RequestFailed(e) => e.is_timeout(),
            EngineError::Timeout => true,
            _ => false,
        }
    }
}

/// 抓取配置
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// 页面抓取超时
    pub page_timeout: Duration,
    /// DNS 解析超时
    pub dns_timeout: Duration,
    /// 流量排名查询超时
    pub rank_timeout: Duration,
    /// 单次请求总超时
    pub request_timeout: Duration,
    /// 最大重定向次数
    pub max_redirects: u32,
    /// User-Agent
    pub user_agent: String,
    /// 流量排名服务地址，`None` 表示不查询
    pub traffic_rank_endpoint: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_timeout: Duration::from_secs(10),
            dns_timeout: Duration::from_secs(5),
            rank_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
            max_redirects: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            traffic_rank_endpoint: Some(DEFAULT_TRAFFIC_RANK_ENDPOINT.to_string()),
        }
    }
}

/// 页面抓取响应
#[derive(Debug, Clone)]
pub struct PageResponse {
    /// 最终 URL
    pub final_url: String,
    /// HTTP状态码，超出重定向上限时为最后一跳的状态码
    pub status_code: u16,
    /// 响应内容
    pub content: String,
    /// 重定向次数
    pub redirect_count: u32,
    /// 外部域名重定向次数
    pub external_redirect_count: u32,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

/// 内容抓取器特质
///
/// 抓取永远不会失败：任何子抓取出错都以降级信号的形式体现在结果中。
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// 抓取 URL 对应的页面与辅助信号
    async fn fetch(&self, url: &str) -> FetchedContent;

    /// 抓取器名称
    fn name(&self) -> &'static str;
}
