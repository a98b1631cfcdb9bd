// ==========================================
// 车间管理系统 - 核心库
// ==========================================
// 范围: 切块物料规划（余料回收匹配）+ KPI 录入步骤引擎
// 系统定位: 纯计算组件，由界面事件同步调用；外部服务只定义契约
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "it");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 目录层 - 回收规则
pub mod catalog;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 界面编排
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BlockMathRequest, BlockMathResult, DaySnapshot, KpiEntry, MaterialCategory, NextStep,
    RecoveryMatch, RecoveryRule, SectorConfig, SectorStaffing, ShiftId, ShiftStatus, StepPosition,
    TransitionKind, WorkItem,
};

// 引擎
pub use engine::{
    MatchStage, RecoveryMatcher, RecoveryMatcherConfig, ShiftDefinition, ShiftTable,
    StaffingOverview, StepSequencer,
};

// 目录
pub use catalog::{CatalogError, InMemoryRecoveryCatalog, RecoveryCatalog};

// API
pub use api::{
    ApiError, ApiResult, BlockMathService, CuttingPlan, CuttingPlanApi, KpiEntrySession, Progress,
    StaffingService,
};

// 配置
pub use config::{LogFormat, PlannerConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "车间管理系统 - 切块规划";
