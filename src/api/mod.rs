//! HTTP 层：路由、处理器与中间件

pub mod middleware;
pub mod services;

use actix_web::web;

use services::{converter_routes, health_routes};

/// 注册全部路由
///
/// `/health` 必须先于根 scope 注册，根 scope 会匹配所有路径。
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_routes()).service(converter_routes());
}
