// ==========================================
// 车间管理系统 - 配置层
// ==========================================
// 职责: 规划器配置加载与校验（匹配容差、语言、日志格式）
// 存储: JSON 文件
// ==========================================

pub mod planner_config;

// 重导出核心配置
pub use planner_config::{
    default_config_path, resolve_config_path, ConfigError, LogFormat, PlannerConfig,
    CONFIG_ENV_VAR,
};
