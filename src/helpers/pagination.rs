//! 分页辅助模块
//!
//! 根据请求的查询参数计算 page、limit、offset，并根据记录总数生成分页元数据。
//! 所有函数都是无状态的纯计算，不依赖数据库或具体的请求类型。

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

/// 默认页码
pub const DEFAULT_PAGE: u64 = 1;

/// 默认每页数量
pub const DEFAULT_LIMIT: u64 = 10;

/// 默认每页数量上限
pub const DEFAULT_MAX_LIMIT: u64 = 100;

/// 分页错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("页码无效: {0}")]
    InvalidPage(String),
    #[error("每页数量无效: {0}")]
    InvalidLimit(String),
    #[error("每页数量 {limit} 超过上限 {max}")]
    LimitTooLarge { limit: u64, max: u64 },
    #[error("每页数量不能为 0")]
    ZeroLimit,
    #[error("偏移量溢出: page={page}, limit={limit}")]
    OffsetOverflow { page: u64, limit: u64 },
    #[error("分页配置无效: {0}")]
    InvalidConfig(String),
}

/// 分页配置
///
/// `strict` 为 true 时拒绝非法参数；为 false 时回退到默认值，并把 limit 截断到上限。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_limits"))]
pub struct PaginationConfig {
    #[validate(range(min = 1, message = "默认页码必须大于 0"))]
    pub default_page: u64,
    #[validate(range(min = 1, message = "默认每页数量必须大于 0"))]
    pub default_limit: u64,
    #[validate(range(min = 1, message = "每页数量上限必须大于 0"))]
    pub max_limit: Option<u64>,
    pub strict: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: DEFAULT_PAGE,
            default_limit: DEFAULT_LIMIT,
            max_limit: Some(DEFAULT_MAX_LIMIT),
            strict: false,
        }
    }
}

impl PaginationConfig {
    /// 严格模式的默认配置
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

fn validate_limits(config: &PaginationConfig) -> Result<(), ValidationError> {
    match config.max_limit {
        Some(max) if max < config.default_limit => {
            let mut err = ValidationError::new("max_limit_below_default");
            err.message = Some("每页数量上限不能小于默认每页数量".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// 格式化验证错误为友好的错误消息
pub(crate) fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match &error.message {
                Some(msg) => msg.to_string(),
                None => format!("字段 '{}' 验证失败: {}", field, error.code),
            };
            messages.push(message);
        }
    }

    messages.sort();
    messages.join(", ")
}

/// 分页查询参数结构体
///
/// 保留原始值，数字和数字字符串都可以反序列化，解析推迟到 [`initialize_pagination`]。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageQuery {
    /// 页码，缺省为 1
    #[serde(default, deserialize_with = "integer_like")]
    pub page: Option<String>,
    /// 每页数量，缺省为 10
    #[serde(default, deserialize_with = "integer_like")]
    pub limit: Option<String>,
}

impl PageQuery {
    /// 从已知的数字构造查询参数
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.map(|p| p.to_string()),
            limit: limit.map(|l| l.to_string()),
        }
    }
}

// 查询字符串里是字符串，JSON 里可能是数字
fn integer_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntegerLike {
        Unsigned(u64),
        Signed(i64),
        Float(f64),
        Text(String),
    }

    let value = Option::<IntegerLike>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        IntegerLike::Unsigned(n) => n.to_string(),
        IntegerLike::Signed(n) => n.to_string(),
        IntegerLike::Float(n) => n.to_string(),
        IntegerLike::Text(s) => s,
    }))
}

/// 初始化后的分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInit {
    pub page: u64,
    pub limit: u64,
    pub offset: u64,
}

/// 分页元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// 当前页码
    pub current_page: u64,
    /// 每页数量
    pub current_page_size: u64,
    /// 总页数
    pub total_pages: u64,
    /// 总记录数
    pub total_records: u64,
}

impl PaginationMeta {
    /// 是否有上一页
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// 是否有下一页
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// 页码和分页元数据的组合结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    pub page: u64,
    pub pagination: PaginationMeta,
}

enum RawValue<'a> {
    Missing,
    Valid(u64),
    Invalid(&'a str),
}

fn parse_positive(raw: Option<&str>) -> RawValue<'_> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return RawValue::Missing;
    };

    match raw.parse::<u64>() {
        Ok(value) if value > 0 => RawValue::Valid(value),
        _ => RawValue::Invalid(raw),
    }
}

fn resolve_page(query: &PageQuery, config: &PaginationConfig) -> Result<u64, PaginationError> {
    match parse_positive(query.page.as_deref()) {
        RawValue::Missing => Ok(config.default_page),
        RawValue::Valid(page) => Ok(page),
        RawValue::Invalid(raw) if config.strict => Err(PaginationError::InvalidPage(raw.to_string())),
        RawValue::Invalid(raw) => {
            tracing::warn!("页码无效: {}，使用默认值 {}", raw, config.default_page);
            Ok(config.default_page)
        }
    }
}

fn resolve_limit(query: &PageQuery, config: &PaginationConfig) -> Result<u64, PaginationError> {
    let limit = match parse_positive(query.limit.as_deref()) {
        RawValue::Missing => config.default_limit,
        RawValue::Valid(limit) => limit,
        RawValue::Invalid(raw) if config.strict => {
            return Err(PaginationError::InvalidLimit(raw.to_string()))
        }
        RawValue::Invalid(raw) => {
            tracing::warn!("每页数量无效: {}，使用默认值 {}", raw, config.default_limit);
            config.default_limit
        }
    };

    match config.max_limit {
        Some(max) if limit > max && config.strict => {
            Err(PaginationError::LimitTooLarge { limit, max })
        }
        Some(max) if limit > max => {
            tracing::warn!("每页数量 {} 超过上限，截断为 {}", limit, max);
            Ok(max)
        }
        _ => Ok(limit),
    }
}

/// 初始化分页参数
///
/// # 参数
/// * `query` - 请求中的 page、limit 原始值
/// * `config` - 默认值、上限与校验策略
///
/// # 返回值
/// 包含 page、limit、offset 的 [`PaginationInit`]，其中 `offset = limit * (page - 1)`
pub fn initialize_pagination(
    query: &PageQuery,
    config: &PaginationConfig,
) -> Result<PaginationInit, PaginationError> {
    config
        .validate()
        .map_err(|e| PaginationError::InvalidConfig(format_validation_errors(&e)))?;

    let page = resolve_page(query, config)?;
    let limit = resolve_limit(query, config)?;
    let offset = page
        .checked_sub(1)
        .and_then(|skipped| limit.checked_mul(skipped))
        .ok_or(PaginationError::OffsetOverflow { page, limit })?;

    tracing::debug!("分页参数: page={}, limit={}, offset={}", page, limit, offset);

    Ok(PaginationInit {
        page,
        limit,
        offset,
    })
}

/// 生成分页元数据
///
/// # 参数
/// * `page` - 当前页码
/// * `limit` - 每页数量
/// * `count` - 查询得到的记录总数
///
/// # 返回值
/// 构建好的 [`PaginationMeta`]；`limit` 为 0 时返回 [`PaginationError::ZeroLimit`]
pub fn get_paginated_data(
    page: u64,
    limit: u64,
    count: u64,
) -> Result<PaginationMeta, PaginationError> {
    if limit == 0 {
        return Err(PaginationError::ZeroLimit);
    }

    Ok(PaginationMeta {
        current_page: page,
        current_page_size: limit,
        total_pages: count.div_ceil(limit),
        total_records: count,
    })
}

/// 获取页码及分页元数据
pub fn get_pagination_params(
    query: &PageQuery,
    count: u64,
    config: &PaginationConfig,
) -> Result<PaginationParams, PaginationError> {
    let PaginationInit { page, limit, .. } = initialize_pagination(query, config)?;
    let pagination = get_paginated_data(page, limit, count)?;

    Ok(PaginationParams { page, pagination })
}

/// 计算显示范围
///
/// # 参数
/// * `page` - 当前页码
/// * `limit` - 每页数量
/// * `current_count` - 当前页实际记录数
///
/// # 返回值
/// (start_item, end_item) - 从 1 开始的首尾序号，当前页为空时为 (0, 0)
pub fn calculate_display_range(page: u64, limit: u64, current_count: usize) -> (u64, u64) {
    if current_count == 0 {
        return (0, 0);
    }

    let start_item = page.saturating_sub(1).saturating_mul(limit).saturating_add(1);
    let end_item = start_item.saturating_add(current_count as u64 - 1);

    (start_item, end_item)
}
