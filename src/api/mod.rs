// ==========================================
// 车间管理系统 - API 层
// ==========================================
// 职责: 面向界面的薄编排层（参数校验、调用外部服务、组合引擎结果）
// 红线: 引擎保持纯函数，外部服务错误在此层转换
// ==========================================

pub mod cutting_plan_api;
pub mod error;
pub mod kpi_entry_session;

pub use cutting_plan_api::{
    describe, format_cm, BlockMathService, CuttingPlan, CuttingPlanApi, RecoverySuggestion,
};
pub use error::{ApiError, ApiResult};
pub use kpi_entry_session::{describe_progress, KpiEntrySession, Progress, StaffingService};
