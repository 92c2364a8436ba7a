//! 分页预览路由
//!
//! 直接暴露分页计算结果，方便调试前端分页组件

use axum::{
    extract::{rejection::QueryRejection, Query},
    Extension, Json,
};
use serde::Deserialize;

use crate::helpers::extract::{Paginated, PaginationRejection};
use crate::helpers::pagination::{
    get_pagination_params, PageQuery, PaginationConfig, PaginationInit, PaginationParams,
};

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    /// 记录总数，缺省为 0
    #[serde(default)]
    pub count: u64,
}

/// 返回初始化后的 page、limit、offset
pub async fn init(Paginated(init): Paginated) -> Json<PaginationInit> {
    Json(init)
}

/// 返回页码及分页元数据
pub async fn params(
    Extension(config): Extension<PaginationConfig>,
    query: Result<Query<PageQuery>, QueryRejection>,
    count: Result<Query<CountQuery>, QueryRejection>,
) -> Result<Json<PaginationParams>, PaginationRejection> {
    let Query(query) = query.map_err(PaginationRejection::Query)?;
    let Query(CountQuery { count }) = count.map_err(PaginationRejection::Query)?;

    let params =
        get_pagination_params(&query, count, &config).map_err(PaginationRejection::Invalid)?;

    tracing::debug!(
        "分页预览: page={}, total_pages={}, total_records={}",
        params.page,
        params.pagination.total_pages,
        params.pagination.total_records
    );

    Ok(Json(params))
}
