// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 分类结论
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// 合法网站
    Legitimate,
    /// 钓鱼网站
    Phishing,
}

impl Verdict {
    /// 将模型原始输出映射为结论
    ///
    /// 0 为合法，其余一律视为钓鱼，与具体模型无关。
    pub fn from_raw(raw: i64) -> Self {
        if raw == 0 {
            Verdict::Legitimate
        } else {
            Verdict::Phishing
        }
    }

    /// 面向终端用户的提示语
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Legitimate => "This web page seems legitimate!",
            Verdict::Phishing => "Attention! This web page is a potential phishing site!",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Legitimate => write!(f, "LEGITIMATE"),
            Verdict::Phishing => write!(f, "PHISHING"),
        }
    }
}
