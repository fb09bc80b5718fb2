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

/// 特征向量维度
pub const FEATURE_COUNT: usize = 14;

/// 特征名称，顺序即模型输入顺序
///
/// 训练好的模型按此顺序读取输入列，任何重排都会静默地破坏预测结果。
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "length_url",
    "ip",
    "nb_at",
    "https_token",
    "nb_subdomains",
    "prefix_suffix",
    "shortening_service",
    "nb_redirection",
    "nb_external_redirection",
    "iframe",
    "onmouseover",
    "right_clic",
    "web_traffic",
    "dns_record",
];

/// 流量排名未知时 `web_traffic` 的取值（与训练数据保持一致）
pub const WEB_TRAFFIC_UNKNOWN: f32 = 0.0;

/// DNS 解析失败（无记录）时 `dns_record` 的取值
pub const DNS_RECORD_MISSING: f32 = 1.0;

/// DNS 解析成功时 `dns_record` 的取值
pub const DNS_RECORD_PRESENT: f32 = 0.0;

/// 取值只能为 0 或 1 的布尔型特征
const FLAG_FEATURES: [&str; 8] = [
    "ip",
    "https_token",
    "prefix_suffix",
    "shortening_service",
    "iframe",
    "onmouseover",
    "right_clic",
    "dns_record",
];

/// 特征向量
///
/// 由 URL 与抓取内容推导出的 14 维数值特征，是所有分类模型的统一输入。
/// 字段声明顺序与 [`FEATURE_NAMES`] 一致，序列化时同样保持该顺序。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    /// URL 字符长度
    pub length_url: f32,
    /// 主机是否为 IP 字面量
    pub ip: f32,
    /// `@` 字符个数
    pub nb_at: f32,
    /// scheme 之外是否出现 `https`
    pub https_token: f32,
    /// 子域名个数
    pub nb_subdomains: f32,
    /// 可注册域名是否包含 `-`
    pub prefix_suffix: f32,
    /// 是否为短链接服务
    pub shortening_service: f32,
    /// 重定向次数
    pub nb_redirection: f32,
    /// 跳转到外部域名的重定向次数
    pub nb_external_redirection: f32,
    /// 页面是否包含 iframe
    pub iframe: f32,
    /// 页面是否包含 onmouseover 事件
    pub onmouseover: f32,
    /// 页面是否禁用右键菜单
    pub right_clic: f32,
    /// 流量排名
    pub web_traffic: f32,
    /// DNS 记录是否缺失
    pub dns_record: f32,
}

impl FeatureVector {
    /// 按固定顺序输出特征值
    pub fn to_vec(&self) -> Vec<f32> {
        vec![
            self.length_url,
            self.ip,
            self.nb_at,
            self.https_token,
            self.nb_subdomains,
            self.prefix_suffix,
            self.shortening_service,
            self.nb_redirection,
            self.nb_external_redirection,
            self.iframe,
            self.onmouseover,
            self.right_clic,
            self.web_traffic,
            self.dns_record,
        ]
    }

    /// 特征名称与取值配对
    pub fn named(&self) -> Vec<(&'static str, f32)> {
        FEATURE_NAMES.iter().copied().zip(self.to_vec()).collect()
    }

    /// 返回违反取值约束的特征名称
    ///
    /// 布尔型特征必须为 0 或 1，计数与长度必须为非负有限值。
    pub fn contract_violations(&self) -> Vec<&'static str> {
        self.named()
            .into_iter()
            .filter(|(name, value)| {
                if !value.is_finite() || *value < 0.0 {
                    return true;
                }
                FLAG_FEATURES.contains(name) && *value != 0.0 && *value != 1.0
            })
            .map(|(name, _)| name)
            .collect()
    }
}

/// 布尔值转换为特征值
pub fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}
