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

use serde::{Deserialize, Serialize};
use std::fmt;

/// 流量排名信号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficRank {
    /// 已知排名
    Known(u64),
    /// 未收录或服务不可用
    Unknown,
}

/// 降级的抓取信号
///
/// 记录哪一路子抓取失败，对应的特征使用默认值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedSignal {
    /// 页面抓取
    Page,
    /// DNS 解析
    Dns,
    /// 流量排名
    TrafficRank,
}

impl fmt::Display for DegradedSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradedSignal::Page => write!(f, "page"),
            DegradedSignal::Dns => write!(f, "dns"),
            DegradedSignal::TrafficRank => write!(f, "traffic_rank"),
        }
    }
}

/// 抓取结果
///
/// 每次请求由抓取器创建，被特征提取器消费一次后丢弃，不做缓存。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedContent {
    /// 跟随重定向后的最终 URL
    pub final_url: String,
    /// 页面 HTML，抓取失败时为空
    pub html: String,
    /// 重定向次数
    pub redirect_count: u32,
    /// 目标域名与原始域名不同的重定向次数
    pub external_redirect_count: u32,
    /// DNS 是否解析成功
    pub dns_resolved: bool,
    /// 流量排名
    pub traffic_rank: TrafficRank,
    /// 降级的子抓取
    pub degraded: Vec<DegradedSignal>,
}

impl FetchedContent {
    /// 构造完全降级的抓取结果
    ///
    /// 所有依赖网络的信号都取默认值，只有 URL 本身可用。
    pub fn degraded_for(url: &str) -> Self {
        Self {
            final_url: url.to_string(),
            html: String::new(),
            redirect_count: 0,
            external_redirect_count: 0,
            dns_resolved: false,
            traffic_rank: TrafficRank::Unknown,
            degraded: vec![
                DegradedSignal::Page,
                DegradedSignal::Dns,
                DegradedSignal::TrafficRank,
            ],
        }
    }

    /// 是否存在降级信号
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}
