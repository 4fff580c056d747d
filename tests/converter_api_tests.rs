//! Converter HTTP API tests
//!
//! Exercises the form page, JSON API, query endpoint and health routes
//! through `actix_web::test` with an offline resolver.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};

use shopee_affiliate::affiliate::{HeadResponse, LinkRewriter, RedirectResolver};
use shopee_affiliate::api::configure_routes;
use shopee_affiliate::api::middleware::RequestIdMiddleware;
use shopee_affiliate::api::services::AppStartTime;
use shopee_affiliate::api::services::types::{ConvertResponse, ErrorResponse, HealthResponse};
use shopee_affiliate::config::AffiliateConfig;
use shopee_affiliate::errors::{AppError, Result};

// =============================================================================
// Test Setup
// =============================================================================

/// Short links resolve to a fixed product page; anything else errors
struct FixedResolver;

impl RedirectResolver for FixedResolver {
    fn head(&self, url: &str) -> Result<HeadResponse> {
        if url.contains("/broken") {
            return Err(AppError::http_client("timed out"));
        }
        Ok(HeadResponse {
            status: 200,
            final_url: "https://shopee.com.br/product/1/2?utm_source=an_old".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

fn rewriter() -> Arc<LinkRewriter> {
    Arc::new(LinkRewriter::new(
        &AffiliateConfig::default(),
        Arc::new(FixedResolver),
    ))
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(rewriter()))
                .app_data(web::Data::new(AppStartTime::now()))
                .configure(configure_routes),
        )
        .await
    };
}

// =============================================================================
// POST /api/convert-shopee
// =============================================================================

#[actix_rt::test]
async fn test_api_convert_with_affiliate_id() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/convert-shopee")
        .set_json(serde_json::json!({
            "url": "shopee.com.br/p/1?utm_source=an_999",
            "affiliate_id": "123"
        }))
        .to_request();
    let resp: ConvertResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.original_url, "shopee.com.br/p/1?utm_source=an_999");
    assert_eq!(resp.affiliate_id, "123");
    assert_eq!(
        resp.converted_url,
        "https://shopee.com.br/p/1?utm_source=an_123&utm_medium=affiliates&utm_campaign=id_123"
    );
}

#[actix_rt::test]
async fn test_api_convert_uses_default_affiliate_id() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/convert-shopee")
        .set_json(serde_json::json!({ "url": "https://shope.ee/abc" }))
        .to_request();
    let resp: ConvertResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.affiliate_id, "18396650603");
    assert!(resp.converted_url.contains("utm_source=an_18396650603"));
}

#[actix_rt::test]
async fn test_api_convert_resolves_short_links() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/convert-shopee")
        .set_json(serde_json::json!({ "url": "s.shopee.com.br/xyz", "affiliate_id": "7" }))
        .to_request();
    let resp: ConvertResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        resp.converted_url,
        "https://shopee.com.br/product/1/2?utm_source=an_7&utm_medium=affiliates&utm_campaign=id_7"
    );
}

#[actix_rt::test]
async fn test_api_convert_short_link_failure_degrades() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/convert-shopee")
        .set_json(serde_json::json!({ "url": "s.shopee.com.br/broken" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: ConvertResponse = test::read_body_json(resp).await;
    assert_eq!(body.converted_url, "https://s.shopee.com.br/broken");
}

#[actix_rt::test]
async fn test_api_convert_empty_url_returns_empty() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/convert-shopee")
        .set_json(serde_json::json!({ "url": "" }))
        .to_request();
    let resp: ConvertResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp.converted_url, "");
}

#[actix_rt::test]
async fn test_api_convert_missing_url_is_bad_request() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/convert-shopee")
        .set_json(serde_json::json!({ "affiliate_id": "1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "URL não fornecida");
}

#[actix_rt::test]
async fn test_api_convert_null_url_returns_empty() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/convert-shopee")
        .set_json(serde_json::json!({ "url": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: ConvertResponse = test::read_body_json(resp).await;
    assert_eq!(body.converted_url, "");
}

#[actix_rt::test]
async fn test_api_convert_plain_text_is_echoed() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/convert-shopee")
        .set_json(serde_json::json!({ "url": "hello world" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: ConvertResponse = test::read_body_json(resp).await;
    assert_eq!(body.converted_url, "https://hello world");
}

#[actix_rt::test]
async fn test_api_convert_invalid_json_is_bad_request() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/convert-shopee")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_api_convert_malformed_url_is_bad_request() {
    let app = test_app!();

    let req = TestRequest::post()
        .uri("/api/convert-shopee")
        .set_json(serde_json::json!({ "url": "https://shopee.com.br:99999/p" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(body.error.starts_with("Invalid URL"));
}

// =============================================================================
// GET /converter
// =============================================================================

#[actix_rt::test]
async fn test_converter_json() {
    let app = test_app!();

    let req = TestRequest::get()
        .uri("/converter?url=https%3A%2F%2Fgoogle.com%2Fsearch%3Fq%3Dx&id=9")
        .to_request();
    let resp: ConvertResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp.converted_url, "https://google.com/search?q=x");
    assert_eq!(resp.affiliate_id, "9");
}

#[actix_rt::test]
async fn test_converter_redirect() {
    let app = test_app!();

    let req = TestRequest::get()
        .uri("/converter?url=shope.ee%2Fabc&id=9&redirect=TRUE")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        "https://shope.ee/abc?utm_source=an_9&utm_medium=affiliates&utm_campaign=id_9"
    );
}

#[actix_rt::test]
async fn test_converter_text() {
    let app = test_app!();

    let req = TestRequest::get()
        .uri("/converter?url=shope.ee%2Fabc&id=9&text=true")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()
            .get("Content-Type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );

    let body = test::read_body(resp).await;
    assert_eq!(
        body,
        "https://shope.ee/abc?utm_source=an_9&utm_medium=affiliates&utm_campaign=id_9"
    );
}

#[actix_rt::test]
async fn test_converter_missing_url_is_bad_request() {
    let app = test_app!();

    for uri in ["/converter", "/converter?url=", "/converter?url=%20%20"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

// =============================================================================
// GET /
// =============================================================================

#[actix_rt::test]
async fn test_index_without_url_shows_form_only() {
    let app = test_app!();

    let req = TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("<form action=\"/\" method=\"get\">"));
    assert!(!html.contains("URL Convertida"));
}

#[actix_rt::test]
async fn test_index_with_url_shows_converted_link() {
    let app = test_app!();

    let req = TestRequest::get()
        .uri("/?shopee_url=shopee.com.br%2Fp%2F1&affiliate_id=55")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = String::from_utf8_lossy(&body);
    assert!(html.contains("URL Convertida"));
    assert!(html.contains(
        "https://shopee.com.br/p/1?utm_source=an_55&amp;utm_medium=affiliates&amp;utm_campaign=id_55"
    ));
    assert!(html.contains("value=\"55\""));
}

// =============================================================================
// Health & middleware
// =============================================================================

#[actix_rt::test]
async fn test_health_routes() {
    let app = test_app!();

    let req = TestRequest::get().uri("/health").to_request();
    let resp: HealthResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp.status, "healthy");

    let req = TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_rt::test]
async fn test_request_id_header() {
    let app = test_app!();

    let req = TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(generated.len(), 36);

    let req = TestRequest::get()
        .uri("/health/ready")
        .insert_header(("X-Request-ID", "upstream-abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get("x-request-id").unwrap().to_str().unwrap(),
        "upstream-abc"
    );
}
