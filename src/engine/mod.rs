// ==========================================
// 车间管理系统 - 引擎层
// ==========================================
// 职责: 纯计算规则引擎（余料回收匹配、KPI 录入步骤）
// 红线: 引擎不做 I/O，不持有跨调用状态
// ==========================================

pub mod recovery_matcher;
pub mod shift_table;
pub mod staffing_overview;
pub mod step_sequencer;

// 重导出核心引擎
pub use recovery_matcher::{MatchStage, RecoveryMatcher, RecoveryMatcherConfig};
pub use shift_table::{ShiftDefinition, ShiftTable, ShiftTableError};
pub use staffing_overview::{SectorProgress, StaffingOverview};
pub use step_sequencer::StepSequencer;
