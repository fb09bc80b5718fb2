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

use crate::domain::models::feature_vector::{
    flag, FeatureVector, DNS_RECORD_MISSING, DNS_RECORD_PRESENT, WEB_TRAFFIC_UNKNOWN,
};
use crate::domain::models::fetched_content::{FetchedContent, TrafficRank};
use crate::domain::services::shortening_services::is_shortening_service;
use crate::utils::url_utils;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

static IFRAME_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("iframe").unwrap());
static ONMOUSEOVER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[onmouseover]").unwrap());
static CONTEXTMENU_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("[oncontextmenu]").unwrap());
static SCRIPT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("script").unwrap());

// Right mouse button check, e.g. `if (event.button == 2) { ... }`
static RIGHT_BUTTON_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"event\.button\s*==\s*2").unwrap());

static BLOCKING_HANDLER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)return\s+false|preventDefault\s*\(").unwrap());

static CONTEXTMENU_SCRIPT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)(oncontextmenu\s*=|addEventListener\s*\(\s*['"]contextmenu['"]).{0,200}?(return\s+false|preventDefault\s*\()"#,
    )
    .unwrap()
});

/// 特征提取器
///
/// 由原始 URL 与抓取结果计算 14 维特征向量。纯函数，不做任何 I/O，
/// 相同输入总是得到相同输出；任何信号缺失时对应特征取默认值，提取本身不会失败。
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// 提取特征向量
    ///
    /// # 参数
    ///
    /// * `url` - 用户输入的原始 URL
    /// * `content` - 抓取结果
    ///
    /// # 返回值
    ///
    /// 按固定顺序排列的特征向量
    pub fn extract(url: &str, content: &FetchedContent) -> FeatureVector {
        let parsed = url_utils::parse_lenient(url);
        let html = HtmlSignals::scan(&content.html);

        FeatureVector {
            length_url: url.chars().count() as f32,
            ip: flag(parsed.as_ref().is_some_and(url_utils::is_ip_host)),
            nb_at: url.matches('@').count() as f32,
            https_token: flag(has_https_token(url)),
            nb_subdomains: parsed
                .as_ref()
                .map(url_utils::subdomain_count)
                .unwrap_or(0) as f32,
            prefix_suffix: flag(parsed.as_ref().is_some_and(has_prefix_suffix)),
            shortening_service: flag(
                parsed
                    .as_ref()
                    .and_then(url_utils::normalized_host)
                    .is_some_and(|host| is_shortening_service(&host)),
            ),
            nb_redirection: content.redirect_count as f32,
            nb_external_redirection: content.external_redirect_count as f32,
            iframe: flag(html.iframe),
            onmouseover: flag(html.onmouseover),
            right_clic: flag(html.right_click_disabled),
            web_traffic: match content.traffic_rank {
                TrafficRank::Known(rank) => rank as f32,
                TrafficRank::Unknown => WEB_TRAFFIC_UNKNOWN,
            },
            dns_record: if content.dns_resolved {
                DNS_RECORD_PRESENT
            } else {
                DNS_RECORD_MISSING
            },
        }
    }
}

/// scheme 之外是否出现 `https` 字样
fn has_https_token(url: &str) -> bool {
    let lowered = url.trim().to_ascii_lowercase();
    let occurrences = lowered.matches("https").count();
    let in_scheme = usize::from(lowered.starts_with("https:"));
    occurrences > in_scheme
}

/// 可注册域名的主体标签是否包含连字符
fn has_prefix_suffix(url: &Url) -> bool {
    if url_utils::is_ip_host(url) {
        return false;
    }
    url_utils::registrable_domain(url)
        .and_then(|domain| domain.split('.').next().map(|label| label.contains('-')))
        .unwrap_or(false)
}

/// 页面 HTML 中的信号
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct HtmlSignals {
    iframe: bool,
    onmouseover: bool,
    right_click_disabled: bool,
}

impl HtmlSignals {
    fn scan(html: &str) -> Self {
        if html.trim().is_empty() {
            return Self::default();
        }

        let document = Html::parse_document(html);

        let iframe = document.select(&IFRAME_SELECTOR).next().is_some();
        let onmouseover = document.select(&ONMOUSEOVER_SELECTOR).next().is_some();

        let blocking_attribute = document.select(&CONTEXTMENU_SELECTOR).any(|element| {
            element
                .value()
                .attr("oncontextmenu")
                .is_some_and(|handler| BLOCKING_HANDLER_PATTERN.is_match(handler))
        });

        let blocking_script = document.select(&SCRIPT_SELECTOR).any(|script| {
            let code = script.text().collect::<String>();
            CONTEXTMENU_SCRIPT_PATTERN.is_match(&code)
        });

        Self {
            iframe,
            onmouseover,
            right_click_disabled: blocking_attribute
                || blocking_script
                || RIGHT_BUTTON_PATTERN.is_match(html),
        }
    }
}

#[cfg(test)]
#[path = "feature_extractor_test.rs"]
mod tests;
