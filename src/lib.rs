//! 分页辅助库
//!
//! 根据请求的 page、limit 查询参数和记录总数计算分页参数与分页元数据。
//!
//! ```
//! use paginator::{get_pagination_params, PageQuery, PaginationConfig};
//!
//! let query = PageQuery::new(Some(2), Some(10));
//! let params = get_pagination_params(&query, 95, &PaginationConfig::default()).unwrap();
//! assert_eq!(params.page, 2);
//! assert_eq!(params.pagination.total_pages, 10);
//! ```

pub mod config;
pub mod helpers;
pub mod routes;

pub use helpers::extract::{Paginated, PaginationRejection};
pub use helpers::pagination::{
    calculate_display_range, get_paginated_data, get_pagination_params, initialize_pagination,
    PageQuery, PaginationConfig, PaginationError, PaginationInit, PaginationMeta,
    PaginationParams,
};
