// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use factory_floor_planner::domain::{
    DaySnapshot, RecoveryRule, SectorConfig, SectorStaffing, ShiftId, ShiftStatus,
};

// ==========================================
// 工段构建器
// ==========================================

pub struct SectorBuilder {
    config_id: i64,
    sector_name: String,
    operators_required: u32,
    shifts: Vec<(ShiftId, i64, ShiftStatus)>,
}

impl SectorBuilder {
    pub fn new(config_id: i64, sector_name: &str) -> Self {
        Self {
            config_id,
            sector_name: sector_name.to_string(),
            operators_required: 1,
            shifts: Vec::new(),
        }
    }

    pub fn required(mut self, operators: u32) -> Self {
        self.operators_required = operators;
        self
    }

    pub fn shift(mut self, shift: ShiftId, ops: i64) -> Self {
        self.shifts.push((shift, ops, ShiftStatus::Empty));
        self
    }

    pub fn shift_with_status(mut self, shift: ShiftId, ops: i64, status: ShiftStatus) -> Self {
        self.shifts.push((shift, ops, status));
        self
    }

    pub fn config(&self) -> SectorConfig {
        SectorConfig {
            config_id: self.config_id,
            sector_name: self.sector_name.clone(),
            operators_required: self.operators_required,
        }
    }

    pub fn staffing(&self) -> SectorStaffing {
        let mut row = SectorStaffing {
            config_id: self.config_id,
            sector_name: self.sector_name.clone(),
            operators_required: self.operators_required,
            ..Default::default()
        };
        for (shift, ops, status) in &self.shifts {
            row.set_shift(*shift, *ops, *status);
        }
        row
    }
}

/// 由多个工段构建快照（配置顺序即构建顺序）
pub fn snapshot(sectors: &[SectorBuilder]) -> DaySnapshot {
    DaySnapshot::new(
        sectors.iter().map(SectorBuilder::config).collect(),
        sectors.iter().map(SectorBuilder::staffing).collect(),
    )
}

/// 常用的两工段快照:
/// - 1 Taglio:   morning=2, afternoon=0, night=1
/// - 2 Imballo:  afternoon=3, custom=1
pub fn two_sector_snapshot() -> DaySnapshot {
    snapshot(&[
        SectorBuilder::new(1, "Taglio")
            .shift(ShiftId::Morning, 2)
            .shift(ShiftId::Afternoon, 0)
            .shift(ShiftId::Night, 1),
        SectorBuilder::new(2, "Imballo")
            .shift(ShiftId::Afternoon, 3)
            .shift(ShiftId::Custom, 1),
    ])
}

pub fn rule(thickness_cm: f64, product_type: &str) -> RecoveryRule {
    RecoveryRule::new(thickness_cm, product_type)
}
