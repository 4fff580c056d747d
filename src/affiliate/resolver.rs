//! 短链跳转解析
//!
//! `RedirectResolver` 抽象出唯一的一次网络调用（HEAD + 跟随跳转），
//! 生产环境使用 ureq，测试中替换为内存实现。

use std::time::Duration;

use tracing::trace;
use ureq::{Agent, ResponseExt};

use crate::config::AffiliateConfig;
use crate::errors::Result;

/// 一次 HEAD 请求的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResponse {
    /// 最终响应的状态码
    pub status: u16,
    /// 跟随跳转后的最终 URL
    pub final_url: String,
}

impl HeadResponse {
    /// 仅 200 / 301 / 302 视为解析成功
    pub fn is_resolved(&self) -> bool {
        matches!(self.status, 200 | 301 | 302)
    }
}

/// 短链解析 trait
///
/// 实现方必须是同步阻塞调用，超时由实现方自行约束。
pub trait RedirectResolver: Send + Sync {
    /// 发起一次 HEAD 请求并跟随跳转
    fn head(&self, url: &str) -> Result<HeadResponse>;

    /// 获取 resolver 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// 基于 ureq 的解析实现
pub struct UreqResolver {
    agent: Agent,
    user_agent: String,
    accept: String,
    accept_language: String,
}

impl UreqResolver {
    pub fn new(config: &AffiliateConfig) -> Self {
        // 非 2xx 不作为错误返回，由调用方判断状态码
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.resolve_timeout_secs)))
            .max_redirects(config.max_redirects)
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            user_agent: config.user_agent.clone(),
            accept: config.accept.clone(),
            accept_language: config.accept_language.clone(),
        }
    }
}

impl RedirectResolver for UreqResolver {
    fn head(&self, url: &str) -> Result<HeadResponse> {
        let resp = self
            .agent
            .head(url)
            .header("User-Agent", self.user_agent.as_str())
            .header("Accept", self.accept.as_str())
            .header("Accept-Language", self.accept_language.as_str())
            .call()?;

        let head = HeadResponse {
            status: resp.status().as_u16(),
            final_url: resp.get_uri().to_string(),
        };
        trace!("HEAD {} -> {} ({})", url, head.final_url, head.status);

        Ok(head)
    }

    fn name(&self) -> &'static str {
        "ureq"
    }
}
