//! 应用配置管理模块
//!
//! 统一管理分页默认值与服务配置，支持从配置文件和环境变量加载

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Error as FigmentError, Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use validator::Validate;

use crate::helpers::pagination::{format_validation_errors, PaginationConfig};

/// 配置加载错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置加载错误: {0}")]
    Loading(#[from] FigmentError),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 服务器配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allow_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_allow_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 应用配置
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
    pub log_level: String,
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            pagination: PaginationConfig::default(),
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl AppConfig {
    /// 从默认位置加载配置
    pub fn load() -> Result<Self, ConfigError> {
        // 配置文件搜索路径
        let config_paths = [
            PathBuf::from("./config.toml"),
            PathBuf::from("../config.toml"),
            PathBuf::from("./config/config.toml"),
        ];

        // 以默认配置为基础
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        for path in config_paths {
            if path.exists() {
                tracing::info!("从配置文件加载: {}", path.display());
                figment = figment.merge(Toml::file(path));
                break; // 只加载第一个存在的配置文件
            }
        }

        // 从环境变量加载（优先级最高），例如 APP_PAGINATION__DEFAULT_LIMIT
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Self::from_figment(figment)
    }

    /// 从给定的 figment 提取并验证配置
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// 验证配置
    fn validate(&self) -> Result<(), ConfigError> {
        // 环境必须是 development、staging 或 production
        if !matches!(
            self.environment.to_lowercase().as_str(),
            "development" | "staging" | "production"
        ) {
            return Err(ConfigError::Validation(
                "环境必须是 development、staging 或 production".to_string(),
            ));
        }

        if !matches!(
            self.log_level.to_lowercase().as_str(),
            "error" | "warn" | "info" | "debug" | "trace"
        ) {
            return Err(ConfigError::Validation(
                "日志级别必须是 error、warn、info、debug 或 trace".to_string(),
            ));
        }

        self.pagination
            .validate()
            .map_err(|e| ConfigError::Validation(format_validation_errors(&e)))?;

        Ok(())
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

// 全局配置实例
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::load()
        .unwrap_or_else(|e| {
            eprintln!("警告: 无法加载配置: {}. 使用默认配置.", e);
            AppConfig::default()
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.server_addr(), "127.0.0.1:3000");
        assert!(!config.is_production());
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.pagination, PaginationConfig::default());
            assert_eq!(config.log_level, "info");
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                environment = "production"

                [pagination]
                default_limit = 20
                max_limit = 50
                strict = true
                "#,
            )?;

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.pagination.default_page, 1);
            assert_eq!(config.pagination.default_limit, 20);
            assert_eq!(config.pagination.max_limit, Some(50));
            assert!(config.pagination.strict);
            assert!(config.is_production());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[pagination]\ndefault_limit = 20\n")?;
            jail.set_env("APP_PAGINATION__DEFAULT_LIMIT", "30");
            jail.set_env("APP_SERVER__PORT", "8080");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.pagination.default_limit, 30);
            assert_eq!(config.server.port, 8080);
            Ok(())
        });
    }

    #[test]
    fn test_rejects_invalid_pagination() {
        Jail::expect_with(|jail| {
            jail.set_env("APP_PAGINATION__DEFAULT_LIMIT", "0");
            let err = AppConfig::load().unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
            assert!(err.to_string().contains("默认每页数量必须大于 0"));
            Ok(())
        });
    }

    #[test]
    fn test_rejects_max_below_default() {
        let mut config = AppConfig::default();
        config.pagination.default_limit = 50;
        config.pagination.max_limit = Some(20);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("每页数量上限不能小于默认每页数量"));
    }

    #[test]
    fn test_rejects_unknown_environment() {
        let config = AppConfig {
            environment: "qa".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
