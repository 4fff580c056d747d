//! 追踪参数（utm_*）的有序映射与改写规则
//!
//! query string 解析为 `name -> [values]` 的有序映射：
//! - 同名参数归并到首次出现的位置，保留全部取值
//! - 空值参数被丢弃
//! - 重新编码时多值参数展开为重复的 `name=value`

use url::form_urlencoded;

/// 规则取值模板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleValue {
    /// 固定值
    Fixed(&'static str),
    /// `<prefix><affiliate_id>`
    AffiliatePrefixed(&'static str),
}

impl RuleValue {
    pub fn render(&self, affiliate_id: &str) -> String {
        match self {
            RuleValue::Fixed(value) => (*value).to_string(),
            RuleValue::AffiliatePrefixed(prefix) => format!("{}{}", prefix, affiliate_id),
        }
    }
}

/// 单条追踪参数规则
///
/// `overwrite = true` 时总是替换为单一取值；否则仅在参数缺失时补齐。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackingRule {
    pub name: &'static str,
    pub value: RuleValue,
    pub overwrite: bool,
}

/// 默认规则，按顺序应用
pub const DEFAULT_TRACKING_RULES: &[TrackingRule] = &[
    TrackingRule {
        name: "utm_source",
        value: RuleValue::AffiliatePrefixed("an_"),
        overwrite: true,
    },
    TrackingRule {
        name: "utm_medium",
        value: RuleValue::Fixed("affiliates"),
        overwrite: false,
    },
    TrackingRule {
        name: "utm_campaign",
        value: RuleValue::AffiliatePrefixed("id_"),
        overwrite: false,
    },
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingParams {
    entries: Vec<(String, Vec<String>)>,
}

impl TrackingParams {
    /// 解析 query string（不含 `?`）
    pub fn parse(query: &str) -> Self {
        let mut params = Self::default();
        for (name, value) in form_urlencoded::parse(query.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            match params.entries.iter_mut().find(|(n, _)| *n == name) {
                Some((_, values)) => values.push(value.into_owned()),
                None => params
                    .entries
                    .push((name.into_owned(), vec![value.into_owned()])),
            }
        }
        params
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 替换为单一取值；参数不存在时追加到末尾
    pub fn set(&mut self, name: &str, value: String) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, values)) => *values = vec![value],
            None => self.entries.push((name.to_string(), vec![value])),
        }
    }

    /// 按顺序应用规则
    pub fn apply_rules(&mut self, rules: &[TrackingRule], affiliate_id: &str) {
        for rule in rules {
            if rule.overwrite || !self.contains(rule.name) {
                self.set(rule.name, rule.value.render(affiliate_id));
            }
        }
    }

    /// 重新编码为 query string
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, values) in &self.entries {
            for value in values {
                serializer.append_pair(name, value);
            }
        }
        // 与 quote_plus 保持一致：`~` 不转义，`*` 转义
        serializer.finish().replace("%7E", "~").replace('*', "%2A")
    }
}
