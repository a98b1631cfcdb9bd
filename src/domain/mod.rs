// ==========================================
// 车间管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod block;
pub mod entry;
pub mod recovery;
pub mod staffing;
pub mod types;

// 重导出核心类型
pub use block::{BlockMathRequest, BlockMathResult};
pub use entry::{DaySnapshot, KpiEntry};
pub use recovery::{RecoveryMatch, RecoveryRule};
pub use staffing::{NextStep, SectorConfig, SectorStaffing, StepPosition, WorkItem};
pub use types::{MaterialCategory, ShiftId, ShiftStatus, TransitionKind};
