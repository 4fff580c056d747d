//! 联盟链接改写模块
//!
//! - `params`: utm_* 参数映射与改写规则
//! - `resolver`: 短链跳转解析（可注入）
//! - `rewriter`: 改写主流程

pub mod params;
pub mod resolver;
pub mod rewriter;

pub use params::{DEFAULT_TRACKING_RULES, RuleValue, TrackingParams, TrackingRule};
pub use resolver::{HeadResponse, RedirectResolver, UreqResolver};
pub use rewriter::{LinkRewriter, normalize_scheme};
