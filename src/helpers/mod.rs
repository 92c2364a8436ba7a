//! 公共辅助模块

pub mod extract;
pub mod pagination;
