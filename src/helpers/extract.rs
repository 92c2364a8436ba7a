//! 分页参数提取器
//!
//! `Paginated` 从查询字符串中读取 page、limit，按当前分页配置计算出 [`PaginationInit`]。
//! 配置优先取请求扩展中的 [`PaginationConfig`]，否则使用全局配置。

use axum::{
    async_trait,
    extract::{rejection::QueryRejection, FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::config::CONFIG;
use crate::helpers::pagination::{
    initialize_pagination, PageQuery, PaginationConfig, PaginationError, PaginationInit,
};

/// 分页参数提取器
///
/// ```ignore
/// async fn list(Paginated(init): Paginated) -> String {
///     format!("LIMIT {} OFFSET {}", init.limit, init.offset)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Paginated(pub PaginationInit);

/// 提取失败的原因
#[derive(Debug)]
pub enum PaginationRejection {
    /// 查询字符串无法解析
    Query(QueryRejection),
    /// 分页参数不合法
    Invalid(PaginationError),
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

impl IntoResponse for PaginationError {
    fn into_response(self) -> Response {
        if let Self::InvalidConfig(_) = self {
            tracing::error!("{}", self);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string());
        }

        tracing::debug!("分页参数被拒绝: {}", self);
        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}

impl IntoResponse for PaginationRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Query(rejection) => error_response(
                StatusCode::BAD_REQUEST,
                format!("查询参数无效: {}", rejection.body_text()),
            ),
            Self::Invalid(err) => err.into_response(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Paginated
where
    S: Send + Sync,
{
    type Rejection = PaginationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PageQuery>::from_request_parts(parts, state)
            .await
            .map_err(PaginationRejection::Query)?;

        let config = parts
            .extensions
            .get::<PaginationConfig>()
            .cloned()
            .unwrap_or_else(|| CONFIG.pagination.clone());

        initialize_pagination(&query, &config)
            .map(Paginated)
            .map_err(PaginationRejection::Invalid)
    }
}
