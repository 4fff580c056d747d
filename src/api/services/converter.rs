//! 链接转换 HTTP 服务
//!
//! - `GET /`：表单页面
//! - `POST /api/convert-shopee`：JSON API
//! - `GET /converter`：查询参数接口，支持跳转 / 纯文本输出

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use rust_embed::Embed;
use tracing::{debug, error, trace};

use super::types::{ConvertRequest, ConvertResponse, ConverterQuery, ErrorResponse, IndexQuery};
use crate::affiliate::LinkRewriter;
use crate::errors::{AppError, Result};

pub const URL_NOT_PROVIDED: &str = "URL não fornecida";
const INVALID_JSON_BODY: &str = "Invalid JSON body";

#[derive(Embed)]
#[folder = "assets/"]
struct PageAssets;

pub struct ConverterService;

impl ConverterService {
    /// 表单页面；携带 shopee_url 时直接展示转换结果
    pub async fn index(
        query: web::Query<IndexQuery>,
        rewriter: web::Data<Arc<LinkRewriter>>,
    ) -> HttpResponse {
        let IndexQuery {
            shopee_url,
            affiliate_id,
        } = query.into_inner();
        let shopee_url = shopee_url.unwrap_or_default();
        let affiliate_id = affiliate_id.unwrap_or_default();
        let default_id = rewriter.default_affiliate_id();

        if shopee_url.is_empty() {
            trace!("Serving empty converter page");
            let page = render_index(&shopee_url, &affiliate_id, default_id, None);
            return Self::html(StatusCode::OK, page);
        }

        match convert(rewriter.get_ref(), shopee_url.clone(), Some(affiliate_id.clone())).await {
            Ok(resp) => {
                let page = render_index(
                    &shopee_url,
                    &affiliate_id,
                    default_id,
                    Some(Ok(resp.converted_url.as_str())),
                );
                Self::html(StatusCode::OK, page)
            }
            Err(e) => {
                let message = e.format_simple();
                let page = render_index(&shopee_url, &affiliate_id, default_id, Some(Err(message.as_str())));
                Self::html(status_for(&e), page)
            }
        }
    }

    /// JSON API：`{url, affiliate_id?}`
    pub async fn api_convert(
        body: web::Bytes,
        rewriter: web::Data<Arc<LinkRewriter>>,
    ) -> HttpResponse {
        let request: ConvertRequest = match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                debug!("Rejected convert request body: {}", e);
                return error_response(StatusCode::BAD_REQUEST, INVALID_JSON_BODY);
            }
        };

        // 字段缺失才报错；显式 null 按空输入处理
        let Some(url) = request.url else {
            return error_response(StatusCode::BAD_REQUEST, URL_NOT_PROVIDED);
        };
        let url = url.unwrap_or_default();

        match convert(rewriter.get_ref(), url, request.affiliate_id).await {
            Ok(resp) => HttpResponse::Ok().json(resp),
            Err(e) => error_from_app(&e),
        }
    }

    /// 查询参数接口：`url`, `id`, `redirect`, `text`
    pub async fn convert_simple(
        query: web::Query<ConverterQuery>,
        rewriter: web::Data<Arc<LinkRewriter>>,
    ) -> HttpResponse {
        let query = query.into_inner();
        let url = match query.url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => return error_response(StatusCode::BAD_REQUEST, URL_NOT_PROVIDED),
        };

        let resp = match convert(rewriter.get_ref(), url, query.id.clone()).await {
            Ok(resp) => resp,
            Err(e) => return error_from_app(&e),
        };

        if query.wants_redirect() {
            HttpResponse::Found()
                .insert_header(("Location", resp.converted_url))
                .finish()
        } else if query.wants_text() {
            HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(resp.converted_url)
        } else {
            HttpResponse::Ok().json(resp)
        }
    }

    fn html(status: StatusCode, body: String) -> HttpResponse {
        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body)
    }
}

async fn convert(
    rewriter: &Arc<LinkRewriter>,
    url: String,
    affiliate_id: Option<String>,
) -> Result<ConvertResponse> {
    let affiliate_id = rewriter
        .effective_affiliate_id(affiliate_id.as_deref())
        .to_string();

    let converted_url = Arc::clone(rewriter)
        .rewrite_blocking(url.clone(), Some(affiliate_id.clone()))
        .await?;
    debug!("Converted {} -> {}", url, converted_url);

    Ok(ConvertResponse {
        original_url: url,
        converted_url,
        affiliate_id,
    })
}

fn status_for(err: &AppError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: message.to_string(),
    })
}

fn error_from_app(err: &AppError) -> HttpResponse {
    let status = status_for(err);
    if status.is_server_error() {
        error!("Conversion failed: {}", err);
    } else {
        debug!("Conversion rejected: {}", err);
    }
    error_response(status, &err.format_simple())
}

fn page_template() -> String {
    match PageAssets::get("index.html") {
        Some(content) => String::from_utf8_lossy(&content.data).into_owned(),
        // 使用编译时包含作为后备
        None => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/index.html")).to_string(),
    }
}

/// 渲染表单页面；`result` 为 None 时不展示结果区域
pub fn render_index(
    shopee_url: &str,
    affiliate_id: &str,
    default_affiliate_id: &str,
    result: Option<std::result::Result<&str, &str>>,
) -> String {
    let result_html = match result {
        None => String::new(),
        Some(Ok(converted)) => format!(
            concat!(
                "<h2 style=\"text-align: center;\">URL Convertida</h2>",
                "<div class=\"url-box\">",
                "<div class=\"url-title\">URL de Afiliado:</div>",
                "<div class=\"url-content\" id=\"converted_url\">{}</div>",
                "<button class=\"copy-btn\" onclick=\"copyToClipboard('converted_url')\">Copiar</button>",
                "</div>"
            ),
            html_escape::encode_text(converted)
        ),
        Some(Err(message)) => format!(
            "<div class=\"url-box error\"><div class=\"url-content\">{}</div></div>",
            html_escape::encode_text(message)
        ),
    };

    let shopee_url = html_escape::encode_double_quoted_attribute(shopee_url);
    let affiliate_id = html_escape::encode_double_quoted_attribute(affiliate_id);
    let default_affiliate_id = html_escape::encode_double_quoted_attribute(default_affiliate_id);

    fill_template(
        &page_template(),
        &[
            ("SHOPEE_URL", &*shopee_url),
            ("AFFILIATE_ID", &*affiliate_id),
            ("DEFAULT_AFFILIATE_ID", &*default_affiliate_id),
            ("RESULT", result_html.as_str()),
            ("VERSION", env!("CARGO_PKG_VERSION")),
        ],
    )
}

/// 单次扫描替换 `%KEY%` 占位符，替换结果不会被再次展开
fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let hit = vars
            .iter()
            .find(|(key, _)| after.starts_with(key) && after[key.len()..].starts_with('%'));
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &after[key.len() + 1..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// 转换服务路由配置
pub fn converter_routes() -> actix_web::Scope {
    web::scope("")
        .route("/", web::get().to(ConverterService::index))
        .route(
            "/api/convert-shopee",
            web::post().to(ConverterService::api_convert),
        )
        .route("/converter", web::get().to(ConverterService::convert_simple))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template_single_pass() {
        let out = fill_template(
            "width: 100%; a=%A% b=%B%",
            &[("A", "%B%"), ("B", "2")],
        );
        assert_eq!(out, "width: 100%; a=%B% b=2");
    }

    #[test]
    fn test_render_index_without_result() {
        let page = render_index("", "", "18396650603", None);
        assert!(page.contains("placeholder=\"18396650603\""));
        assert!(!page.contains("URL Convertida"));
        assert!(!page.contains("%RESULT%"));
    }

    #[test]
    fn test_render_index_escapes_user_input() {
        let page = render_index(
            "\"><script>alert(1)</script>",
            "1",
            "2",
            Some(Ok("https://shopee.com.br/?a=1&b=2")),
        );
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&quot;&gt;&lt;script&gt;"));
        assert!(page.contains("https://shopee.com.br/?a=1&amp;b=2"));
        assert!(page.contains("URL Convertida"));
    }

    #[test]
    fn test_render_index_error_box() {
        let page = render_index("x", "", "2", Some(Err("Invalid URL: bad")));
        assert!(page.contains("url-box error"));
        assert!(page.contains("Invalid URL: bad"));
    }
}
