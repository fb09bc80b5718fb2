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

use crate::engines::traits::{EngineError, PageResponse};
use crate::utils::url_utils;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

/// 页面抓取引擎
///
/// 基于reqwest实现的HTTP抓取引擎。自动重定向被关闭，由引擎逐跳跟随，
/// 以便统计重定向次数以及跳转到外部域名的次数。
pub struct ReqwestEngine {
    timeout: Duration,
    max_redirects: u32,
    user_agent: String,
}

impl ReqwestEngine {
    /// 创建页面抓取引擎
    ///
    /// # 参数
    ///
    /// * `timeout` - 单次 HTTP 请求超时
    /// * `max_redirects` - 最多跟随的重定向次数
    /// * `user_agent` - 请求使用的 User-Agent
    pub fn new(timeout: Duration, max_redirects: u32, user_agent: impl Into<String>) -> Self {
        Self {
            timeout,
            max_redirects,
            user_agent: user_agent.into(),
        }
    }

    /// 抓取页面并跟随重定向
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(PageResponse)` - 最终页面及重定向统计
    /// * `Err(EngineError)` - 连接失败、超时或重定向地址无效
    pub async fn fetch_page(&self, url: &Url) -> Result<PageResponse, EngineError> {
        // Each request gets a fresh client, nothing is shared between classifications
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .redirect(Policy::none())
            .build()?;

        let origin_domain = url_utils::registrable_domain(url);
        let start = Instant::now();
        let mut current = url.clone();
        let mut redirect_count = 0u32;
        let mut external_redirect_count = 0u32;

        loop {
            let response = client.get(current.clone()).send().await?;
            let status_code = response.status().as_u16();

            let location = if response.status().is_redirection() {
                response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            } else {
                None
            };

            let Some(location) = location else {
                let content = response.text().await?;
                return Ok(PageResponse {
                    final_url: current.to_string(),
                    status_code,
                    content,
                    redirect_count,
                    external_redirect_count,
                    response_time_ms: start.elapsed().as_millis() as u64,
                });
            };

            if redirect_count >= self.max_redirects {
                warn!(
                    url = %url,
                    max_redirects = self.max_redirects,
                    "Redirect limit reached, stopping"
                );
                return Ok(PageResponse {
                    final_url: current.to_string(),
                    status_code,
                    content: String::new(),
                    redirect_count,
                    external_redirect_count,
                    response_time_ms: start.elapsed().as_millis() as u64,
                });
            }

            let next = url_utils::resolve_url(&current, &location)
                .map_err(|e| EngineError::InvalidUrl(format!("{}: {}", location, e)))?;

            redirect_count += 1;
            let external = url_utils::registrable_domain(&next) != origin_domain;
            if external {
                external_redirect_count += 1;
            }
            debug!(from = %current, to = %next, external, "Following redirect");

            current = next;
        }
    }

    /// 获取引擎名称
    pub fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
