// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 已知的短链接服务域名
pub const SHORTENING_SERVICES: &[&str] = &[
    "1url.com", "adf.ly", "bc.vc", "bit.do", "bit.ly", "bitly.com", "bkite.com",
    "budurl.com", "buzurl.com", "cli.gs", "cur.lv", "cutt.ly", "cutt.us", "db.tt",
    "doiop.com", "ff.im", "fic.kr", "filoops.info", "go2l.ink", "goo.gl", "is.gd",
    "ity.im", "j.mp", "just.as", "kl.am", "link.zip.net", "lnkd.in", "loopt.us",
    "migre.me", "om.ly", "ow.ly", "ping.fm", "po.st", "post.ly", "prettylinkpro.com",
    "q.gs", "qr.ae", "qr.net", "rb.gy", "rebrand.ly", "rubyurl.com", "scrnch.me",
    "short.ie", "short.to", "shorte.st", "shorturl.at", "snipr.com", "snipurl.com",
    "su.pr", "t.co", "tiny.cc", "tinyurl.com", "to.ly", "tr.im", "tweez.me",
    "twit.ac", "twitthis.com", "twurl.nl", "u.bb", "u.to", "url4.eu", "v.gd",
    "vzturl.com", "wp.me", "x.co", "yfrog.com", "yourls.org",
];

/// 主机是否属于短链接服务
///
/// 忽略开头的 `www.`，匹配服务域名本身及其子域名。
pub fn is_shortening_service(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);

    SHORTENING_SERVICES
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}
