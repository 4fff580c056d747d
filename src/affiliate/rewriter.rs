//! Shopee 联盟链接改写
//!
//! 处理流程：
//! 1. 空输入直接返回空字符串
//! 2. 补全协议（缺省 https://）
//! 3. 短链域名先发一次 HEAD 跟随跳转，失败则原样返回
//! 4. 非电商域名原样返回
//! 5. 按规则改写 utm_* 参数并重新拼装 URL

use std::sync::Arc;

use tracing::{debug, trace, warn};
use url::Url;

use super::params::{DEFAULT_TRACKING_RULES, TrackingParams, TrackingRule};
use super::resolver::{RedirectResolver, UreqResolver};
use crate::config::AffiliateConfig;
use crate::errors::{AppError, Result};

pub struct LinkRewriter {
    default_affiliate_id: String,
    short_link_domain: String,
    commerce_domains: Vec<String>,
    rules: Vec<TrackingRule>,
    resolver: Arc<dyn RedirectResolver>,
}

impl LinkRewriter {
    pub fn new(config: &AffiliateConfig, resolver: Arc<dyn RedirectResolver>) -> Self {
        debug!(
            "LinkRewriter: short link domain {}, commerce domains {:?}, resolver {}",
            config.short_link_domain,
            config.commerce_domains,
            resolver.name()
        );

        Self {
            default_affiliate_id: config.default_affiliate_id.clone(),
            short_link_domain: config.short_link_domain.clone(),
            commerce_domains: config.commerce_domains.clone(),
            rules: DEFAULT_TRACKING_RULES.to_vec(),
            resolver,
        }
    }

    /// 使用 ureq 解析短链
    pub fn from_config(config: &AffiliateConfig) -> Self {
        Self::new(config, Arc::new(UreqResolver::new(config)))
    }

    /// 替换追踪参数规则
    pub fn with_rules(mut self, rules: Vec<TrackingRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn default_affiliate_id(&self) -> &str {
        &self.default_affiliate_id
    }

    /// 调用方给出的联盟 ID；缺失或空白时使用默认值
    pub fn effective_affiliate_id<'a>(&'a self, affiliate_id: Option<&'a str>) -> &'a str {
        affiliate_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.default_affiliate_id)
    }

    /// 改写链接
    ///
    /// 短链解析失败不会返回错误；无法解析的文本原样返回，只有指向电商或短链域名的无效 URL 返回 `AppError::InvalidUrl`。
    pub fn rewrite(&self, input: &str, affiliate_id: Option<&str>) -> Result<String> {
        let Some(normalized) = normalize_scheme(input) else {
            return Ok(String::new());
        };

        let parsed = match Url::parse(&normalized) {
            Ok(url) => url,
            // 解析失败：目标是电商域名时报错，其他文本原样返回
            Err(e) if self.targets_known_domain(rough_host(&normalized)) => {
                return Err(AppError::invalid_url(format!("{}: {}", normalized, e)));
            }
            Err(e) => {
                trace!("Unparsable non-commerce input left untouched: {} ({})", normalized, e);
                return Ok(normalized);
            }
        };

        let (working, parsed) = if self.is_short_link(&parsed) {
            match self.resolve_short_link(&normalized) {
                Some(resolved) => {
                    let reparsed = parse_url(&resolved)?;
                    (resolved, reparsed)
                }
                None => return Ok(normalized),
            }
        } else {
            (normalized, parsed)
        };

        if !self.is_commerce_domain(&parsed) {
            trace!("Not a commerce URL, leaving untouched: {}", working);
            return Ok(working);
        }

        let affiliate_id = self.effective_affiliate_id(affiliate_id);
        Ok(self.apply_tracking(parsed, affiliate_id))
    }

    /// 在阻塞线程池中执行改写，避免阻塞 actix worker
    pub async fn rewrite_blocking(
        self: Arc<Self>,
        input: String,
        affiliate_id: Option<String>,
    ) -> Result<String> {
        tokio::task::spawn_blocking(move || self.rewrite(&input, affiliate_id.as_deref())).await?
    }

    fn is_short_link(&self, url: &Url) -> bool {
        url.host_str()
            .is_some_and(|host| host.contains(self.short_link_domain.as_str()))
    }

    fn is_commerce_domain(&self, url: &Url) -> bool {
        url.host_str()
            .is_some_and(|host| self.is_commerce_host(host))
    }

    fn is_commerce_host(&self, host: &str) -> bool {
        self.commerce_domains
            .iter()
            .any(|domain| host.contains(domain.as_str()))
    }

    fn targets_known_domain(&self, host: &str) -> bool {
        let host = host.to_ascii_lowercase();
        host.contains(self.short_link_domain.as_str()) || self.is_commerce_host(&host)
    }

    /// 单次 HEAD 解析；任何失败都返回 None
    fn resolve_short_link(&self, url: &str) -> Option<String> {
        match self.resolver.head(url) {
            Ok(head) if head.is_resolved() => {
                debug!("Resolved shortened URL {} to: {}", url, head.final_url);
                Some(head.final_url)
            }
            Ok(head) => {
                warn!(
                    "Failed to resolve shortened URL {}. Status code: {}",
                    url, head.status
                );
                None
            }
            Err(e) => {
                warn!("Error resolving shortened URL {}: {}", url, e);
                None
            }
        }
    }

    fn apply_tracking(&self, mut url: Url, affiliate_id: &str) -> String {
        let mut params = TrackingParams::parse(url.query().unwrap_or(""));
        params.apply_rules(&self.rules, affiliate_id);

        let query = params.to_query_string();
        if query.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&query));
        }
        url.into()
    }
}

/// 去除首尾空白并补全协议；空输入返回 None
pub fn normalize_scheme(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{}", trimmed))
    }
}

/// `://` 之后到第一个 `/`、`?` 或 `#` 之前的文本
fn rough_host(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| AppError::invalid_url(format!("{}: {}", raw, e)))
}
