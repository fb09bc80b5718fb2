// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{Host, ParseError, Url};

/// 常见的二级公共后缀，可注册域名需要向左多取一级
const SECOND_LEVEL_SUFFIXES: &[&str] = &[
    "ac.uk", "co.uk", "gov.uk", "ltd.uk", "me.uk", "net.uk", "org.uk", "plc.uk",
    "com.au", "net.au", "org.au", "edu.au", "gov.au",
    "co.nz", "net.nz", "org.nz",
    "co.jp", "ne.jp", "or.jp", "ac.jp",
    "co.kr", "or.kr",
    "co.in", "net.in", "org.in", "gov.in",
    "co.za", "org.za",
    "com.br", "net.br", "org.br", "gov.br",
    "com.cn", "net.cn", "org.cn", "gov.cn",
    "com.hk", "com.tw", "com.sg", "com.my",
    "com.mx", "com.ar", "com.co", "com.tr",
    "co.id", "co.il", "co.th",
];

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 宽松解析 URL
///
/// 先按原样解析，若失败或缺少主机则补全 `http://` 再试一次。
pub fn parse_lenient(raw: &str) -> Option<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(trimmed) {
        if url.host().is_some() {
            return Some(url);
        }
    }

    Url::parse(&format!("http://{}", trimmed))
        .ok()
        .filter(|url| url.host().is_some())
}

/// 规范化后的主机名（小写、去掉末尾的点）
pub fn normalized_host(url: &Url) -> Option<String> {
    url.host_str()
        .map(|h| h.trim_end_matches('.').to_ascii_lowercase())
        .filter(|h| !h.is_empty())
}

/// 主机是否为 IPv4 / IPv6 字面量
pub fn is_ip_host(url: &Url) -> bool {
    matches!(url.host(), Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)))
}

/// 计算可注册域名
///
/// 取最后两级标签；若最后两级是已知的二级公共后缀则取最后三级。
/// IP 字面量原样返回。
pub fn registrable_domain(url: &Url) -> Option<String> {
    let host = normalized_host(url)?;
    if is_ip_host(url) {
        return Some(host);
    }

    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    let take = registrable_label_count(&labels);
    Some(labels[labels.len().saturating_sub(take)..].join("."))
}

/// 子域名个数：主机标签数减去可注册域名的标签数
pub fn subdomain_count(url: &Url) -> usize {
    if is_ip_host(url) {
        return 0;
    }
    let Some(host) = normalized_host(url) else {
        return 0;
    };

    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    labels.len().saturating_sub(registrable_label_count(&labels))
}

fn registrable_label_count(labels: &[&str]) -> usize {
    if labels.len() >= 3 {
        let suffix = labels[labels.len() - 2..].join(".");
        if SECOND_LEVEL_SUFFIXES.contains(&suffix.as_str()) {
            return 3;
        }
    }
    labels.len().min(2)
}
