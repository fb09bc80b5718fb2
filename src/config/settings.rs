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

use crate::engines::traits::{FetchConfig, DEFAULT_TRAFFIC_RANK_ENDPOINT, DEFAULT_USER_AGENT};
use crate::infrastructure::models::registry::ModelLoadOptions;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "PHISHRS";

/// 应用程序配置设置
///
/// 包含服务器、模型目录、抓取超时与流量排名服务等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 模型配置
    pub models: ModelSettings,
    /// 抓取配置
    pub fetcher: FetcherSettings,
    /// 流量排名配置
    pub traffic_rank: TrafficRankSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 模型配置设置
#[derive(Debug, Deserialize)]
pub struct ModelSettings {
    /// 模型文件目录（相对路径以进程工作目录为基准）
    pub directory: String,
    /// ONNX 输入张量名称
    pub onnx_input: String,
    /// ONNX 输出张量名称
    pub onnx_output: String,
}

/// 抓取配置设置
#[derive(Debug, Deserialize)]
pub struct FetcherSettings {
    /// 页面抓取超时（毫秒）
    pub page_timeout_ms: u64,
    /// DNS 解析超时（毫秒）
    pub dns_timeout_ms: u64,
    /// 流量排名查询超时（毫秒）
    pub rank_timeout_ms: u64,
    /// 单次请求总超时（毫秒）
    pub request_timeout_ms: u64,
    /// 最大重定向次数
    pub max_redirects: u32,
    /// User-Agent
    pub user_agent: String,
}

/// 流量排名配置设置
#[derive(Debug, Deserialize)]
pub struct TrafficRankSettings {
    /// 是否查询流量排名
    pub enabled: bool,
    /// 服务地址
    pub endpoint: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default.toml`、`config/{APP_ENVIRONMENT}.toml`
    /// 和 `PHISHRS__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::build(
            Path::new("config"),
            &env,
            Environment::with_prefix(ENV_PREFIX).separator("__"),
        )
    }

    fn build(config_dir: &Path, env: &str, environment: Environment) -> Result<Self, ConfigError> {
        let defaults = FetchConfig::default();
        let load_options = ModelLoadOptions::default();

        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("models.directory", "models")?
            .set_default("models.onnx_input", load_options.onnx_input)?
            .set_default("models.onnx_output", load_options.onnx_output)?
            .set_default("fetcher.page_timeout_ms", millis(defaults.page_timeout))?
            .set_default("fetcher.dns_timeout_ms", millis(defaults.dns_timeout))?
            .set_default("fetcher.rank_timeout_ms", millis(defaults.rank_timeout))?
            .set_default("fetcher.request_timeout_ms", millis(defaults.request_timeout))?
            .set_default("fetcher.max_redirects", defaults.max_redirects)?
            .set_default("fetcher.user_agent", DEFAULT_USER_AGENT)?
            .set_default("traffic_rank.enabled", true)?
            .set_default("traffic_rank.endpoint", DEFAULT_TRAFFIC_RANK_ENDPOINT)?
            .add_source(File::with_name(&config_dir.join("default").to_string_lossy()).required(false))
            .add_source(File::with_name(&config_dir.join(env).to_string_lossy()).required(false))
            .add_source(environment);

        builder.build()?.try_deserialize()
    }

    /// 转换为抓取引擎配置
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            page_timeout: Duration::from_millis(self.fetcher.page_timeout_ms),
            dns_timeout: Duration::from_millis(self.fetcher.dns_timeout_ms),
            rank_timeout: Duration::from_millis(self.fetcher.rank_timeout_ms),
            request_timeout: Duration::from_millis(self.fetcher.request_timeout_ms),
            max_redirects: self.fetcher.max_redirects,
            user_agent: self.fetcher.user_agent.clone(),
            traffic_rank_endpoint: self
                .traffic_rank
                .enabled
                .then(|| self.traffic_rank.endpoint.clone()),
        }
    }

    /// 转换为模型加载选项
    pub fn model_load_options(&self) -> ModelLoadOptions {
        ModelLoadOptions {
            onnx_input: self.models.onnx_input.clone(),
            onnx_output: self.models.onnx_output.clone(),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
