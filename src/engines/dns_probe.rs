// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::EngineError;
use crate::utils::url_utils;
use tokio::net::lookup_host;
use url::Url;

/// 解析 URL 主机的 DNS 记录
///
/// 返回解析到的地址数量；IP 字面量视为已解析。
/// 与页面抓取相互独立，没有 DNS 记录本身就是钓鱼信号。
pub async fn resolve_host(url: &Url) -> Result<usize, EngineError> {
    if url_utils::is_ip_host(url) {
        return Ok(1);
    }

    let host = url
        .host_str()
        .ok_or_else(|| EngineError::InvalidUrl(format!("Missing host: {}", url)))?;
    let port = url.port_or_known_default().unwrap_or(80);

    let addrs = lookup_host((host, port))
        .await
        .map_err(|e| EngineError::Dns(format!("{}: {}", host, e)))?;

    match addrs.count() {
        0 => Err(EngineError::Dns(format!("{}: no records", host))),
        n => Ok(n),
    }
}
