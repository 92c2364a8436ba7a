//! 路由模块
//!
//! 组装分页预览服务的全部路由

pub mod health;
pub mod pagination;

use axum::{routing::get, Extension, Router};

use crate::helpers::pagination::PaginationConfig;

/// 创建路由，分页配置通过 Extension 注入到所有处理器
pub fn router(config: PaginationConfig) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/pagination", get(pagination::params))
        .route("/api/pagination/init", get(pagination::init))
        .layer(Extension(config))
}
