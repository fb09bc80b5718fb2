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

use crate::engines::traits::EngineError;
use serde::Deserialize;
use std::time::Duration;

/// 排名服务响应
#[derive(Debug, Deserialize)]
struct RankResponse {
    #[serde(default)]
    ranks: Vec<RankEntry>,
}

/// 单日排名
#[derive(Debug, Deserialize)]
struct RankEntry {
    rank: u64,
}

/// 流量排名客户端
///
/// 查询第三方排名服务（Tranco list API 格式）：
/// `GET {endpoint}/ranks/domain/{domain}` 返回
/// `{"domain": "...", "ranks": [{"date": "...", "rank": N}]}`，取第一条（最新）排名。
pub struct TrafficRankClient {
    endpoint: String,
    timeout: Duration,
    user_agent: String,
}

impl TrafficRankClient {
    /// 创建排名客户端
    pub fn new(endpoint: impl Into<String>, timeout: Duration, user_agent: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            timeout,
            user_agent: user_agent.into(),
        }
    }

    /// 查询域名排名
    ///
    /// # 返回值
    ///
    /// * `Ok(Some(rank))` - 已收录
    /// * `Ok(None)` - 未收录
    /// * `Err(EngineError)` - 服务不可用或响应无法解析
    pub async fn lookup(&self, domain: &str) -> Result<Option<u64>, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .build()?;

        let url = format!("{}/ranks/domain/{}", self.endpoint, domain);
        let response = client.get(&url).send().await?.error_for_status()?;
        let body: RankResponse = response.json().await?;

        Ok(body.ranks.first().map(|entry| entry.rank))
    }
}
