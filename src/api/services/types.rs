//! HTTP API 类型定义

use serde::{Deserialize, Deserializer, Serialize};

/// `GET /` 表单参数
#[derive(Deserialize, Clone, Debug, Default)]
pub struct IndexQuery {
    pub shopee_url: Option<String>,
    pub affiliate_id: Option<String>,
}

/// `POST /api/convert-shopee` 请求体
///
/// `url`：字段缺失为 `None`，显式 `null` 为 `Some(None)`
#[derive(Deserialize, Clone, Debug)]
pub struct ConvertRequest {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub url: Option<Option<String>>,
    pub affiliate_id: Option<String>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// `GET /converter` 查询参数
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ConverterQuery {
    pub url: Option<String>,
    pub id: Option<String>,
    pub redirect: Option<String>,
    pub text: Option<String>,
}

impl ConverterQuery {
    pub fn wants_redirect(&self) -> bool {
        is_truthy(self.redirect.as_deref())
    }

    pub fn wants_text(&self) -> bool {
        is_truthy(self.text.as_deref())
    }
}

fn is_truthy(flag: Option<&str>) -> bool {
    flag.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ConvertResponse {
    pub original_url: String,
    pub converted_url: String,
    pub affiliate_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub uptime: u64,
    pub response_time_ms: u32,
}
