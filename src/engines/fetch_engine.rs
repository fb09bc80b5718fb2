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

use crate::domain::models::fetched_content::{DegradedSignal, FetchedContent, TrafficRank};
use crate::engines::dns_probe;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::traffic_rank::TrafficRankClient;
use crate::engines::traits::{ContentFetcher, EngineError, FetchConfig, PageResponse};
use crate::utils::url_utils;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// 内容抓取引擎
///
/// 并发执行页面抓取、DNS 解析与流量排名查询三路子抓取。
/// 每一路的时限取自身超时与请求级超时中较小者，因此整体耗时不超过请求级超时，
/// 且已完成的子抓取结果不会因其他路超时而丢弃。任何一路失败只影响依赖它的特征。
pub struct FetchEngine {
    config: FetchConfig,
    page: ReqwestEngine,
    rank: Option<TrafficRankClient>,
}

impl FetchEngine {
    /// 创建内容抓取引擎
    pub fn new(config: FetchConfig) -> Self {
        let page = ReqwestEngine::new(
            config.page_timeout,
            config.max_redirects,
            config.user_agent.clone(),
        );
        let rank = config.traffic_rank_endpoint.as_ref().map(|endpoint| {
            TrafficRankClient::new(
                endpoint.clone(),
                config.rank_timeout,
                config.user_agent.clone(),
            )
        });

        Self { config, page, rank }
    }

    /// 当前配置
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    async fn lookup_rank(&self, domain: Option<&str>) -> Result<Option<u64>, EngineError> {
        match (&self.rank, domain) {
            (Some(client), Some(domain)) => client.lookup(domain).await,
            _ => Ok(None),
        }
    }

    fn assemble(
        raw_url: &str,
        page: Result<PageResponse, EngineError>,
        dns: Result<usize, EngineError>,
        rank: Result<Option<u64>, EngineError>,
    ) -> FetchedContent {
        let mut content = FetchedContent::degraded_for(raw_url);
        content.degraded.clear();

        match page {
            Ok(page) => {
                content.final_url = page.final_url;
                content.html = page.content;
                content.redirect_count = page.redirect_count;
                content.external_redirect_count = page.external_redirect_count;
                debug!(
                    url = raw_url,
                    status = page.status_code,
                    redirects = page.redirect_count,
                    elapsed_ms = page.response_time_ms,
                    "Page fetched"
                );
            }
            Err(e) => {
                warn!(url = raw_url, error = %e, "Page fetch degraded");
                content.degraded.push(DegradedSignal::Page);
            }
        }

        match dns {
            Ok(_) => content.dns_resolved = true,
            // A failed lookup is a signal in itself, only a timeout means the signal is missing
            Err(e) if e.is_timeout() => {
                warn!(url = raw_url, "DNS lookup timed out");
                content.degraded.push(DegradedSignal::Dns);
            }
            Err(e) => debug!(url = raw_url, error = %e, "DNS lookup failed"),
        }

        match rank {
            Ok(Some(rank)) => content.traffic_rank = TrafficRank::Known(rank),
            Ok(None) => {}
            Err(e) => {
                warn!(url = raw_url, error = %e, "Traffic rank lookup degraded");
                content.degraded.push(DegradedSignal::TrafficRank);
            }
        }

        content
    }
}

/// 为子抓取加上超时，超时折叠为 [`EngineError::Timeout`]
async fn bounded<T, F>(limit: Duration, fut: F) -> Result<T, EngineError>
where
    F: Future<Output = Result<T, EngineError>>,
{
    timeout(limit, fut)
        .await
        .unwrap_or(Err(EngineError::Timeout))
}

#[async_trait]
impl ContentFetcher for FetchEngine {
    /// 抓取页面与辅助信号
    ///
    /// # 参数
    ///
    /// * `raw_url` - 用户输入的 URL，缺少 scheme 时按 `http://` 处理
    ///
    /// # 返回值
    ///
    /// 抓取结果；失败的子抓取记录在 `degraded` 中
    async fn fetch(&self, raw_url: &str) -> FetchedContent {
        let Some(url) = url_utils::parse_lenient(raw_url) else {
            warn!(url = raw_url, "Unparseable URL, skipping network signals");
            return FetchedContent::degraded_for(raw_url);
        };

        let domain = if url_utils::is_ip_host(&url) {
            None
        } else {
            url_utils::registrable_domain(&url)
        };

        // Sub-fetch limits are clamped to the request deadline
        let deadline = self.config.request_timeout;
        let page = bounded(
            self.config.page_timeout.min(deadline),
            self.page.fetch_page(&url),
        );
        let dns = bounded(
            self.config.dns_timeout.min(deadline),
            dns_probe::resolve_host(&url),
        );
        let rank = bounded(
            self.config.rank_timeout.min(deadline),
            self.lookup_rank(domain.as_deref()),
        );

        let (page, dns, rank) = tokio::join!(page, dns, rank);
        Self::assemble(raw_url, page, dns, rank)
    }

    fn name(&self) -> &'static str {
        "fetch"
    }
}
