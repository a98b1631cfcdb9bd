// ==========================================
// 车间管理系统 - 规划器配置
// ==========================================
// 来源优先级: 显式路径 > 环境变量 FLOOR_PLANNER_CONFIG > 用户配置目录 > 默认值
// 格式: JSON，缺省字段取默认值
// ==========================================

use crate::engine::recovery_matcher::RecoveryMatcherConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_ENV_VAR: &str = "FLOOR_PLANNER_CONFIG";

/// 用户配置目录下的子目录名
pub const CONFIG_DIR_NAME: &str = "factory-floor-planner";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置项无效 ({key}): {message}")]
    InvalidValue { key: String, message: String },
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// 规划器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub recovery: RecoveryMatcherConfig,
    pub locale: String,
    pub log_format: LogFormat,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            recovery: RecoveryMatcherConfig::default(),
            locale: "it".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl PlannerConfig {
    /// 从指定文件加载并校验
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let path_text = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path_text.clone(),
            message: e.to_string(),
        })?;

        let config: PlannerConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path_text.clone(),
                message: e.to_string(),
            })?;
        config.validate()?;

        info!(path = %path_text, "配置已加载");
        Ok(config)
    }

    /// 按优先级查找配置文件，找不到时使用默认值
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match resolve_config_path(explicit) {
            Some(path) => Self::load(&path),
            None => {
                debug!("未找到配置文件，使用默认配置");
                Ok(Self::default())
            }
        }
    }

    /// 校验配置项
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("recovery.close_tolerance_cm", self.recovery.close_tolerance_cm)?;
        check_non_negative(
            "recovery.combination_leftover_limit_cm",
            self.recovery.combination_leftover_limit_cm,
        )?;
        if self.locale.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "locale".to_string(),
                message: "不能为空".to_string(),
            });
        }
        Ok(())
    }
}

fn check_non_negative(key: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("必须为非负有限数，实际 {}", value),
        });
    }
    Ok(())
}

/// 解析配置文件路径
///
/// 显式路径与环境变量路径总是返回（不存在时由 load 报错）；
/// 用户配置目录下的默认文件仅在存在时返回
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(value) = std::env::var(CONFIG_ENV_VAR) {
        if !value.trim().is_empty() {
            return Some(PathBuf::from(value.trim()));
        }
    }

    default_config_path().filter(|p| p.exists())
}

/// 用户配置目录下的默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"recovery": {{"close_tolerance_cm": 0.3}}}}"#).unwrap();

        let config = PlannerConfig::load(file.path()).unwrap();
        assert_eq!(config.recovery.close_tolerance_cm, 0.3);
        assert_eq!(config.recovery.combination_leftover_limit_cm, 1.0);
        assert_eq!(config.locale, "it");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"recovery": {{"close_tolerance_cm": -1}}}}"#).unwrap();

        assert!(matches!(
            PlannerConfig::load(file.path()),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            PlannerConfig::load(file.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_explicit_missing_path_is_read_error() {
        let result = PlannerConfig::load_or_default(Some(Path::new("/nonexistent/planner.json")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
