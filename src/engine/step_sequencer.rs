// ==========================================
// 车间管理系统 - KPI 录入步骤引擎
// ==========================================
// 职责: 根据排班总览计算 (工段, 班次) 的遍历顺序与下一步
// 规则:
//   - 工段按配置顺序，班次按班次表固定顺序
//   - 在岗人数为 0 的组合跳过，但当前打开的组合始终保留
//   - 每次数据加载/保存后重新计算，不缓存
// 红线: 缺失/异常排班行按 0 人处理（宁可排除，不可误入）
// ==========================================

use crate::domain::staffing::{NextStep, SectorConfig, SectorStaffing, StepPosition, WorkItem};
use crate::engine::shift_table::ShiftTable;
use tracing::{debug, instrument};

// ==========================================
// StepSequencer - 步骤引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StepSequencer {
    shifts: ShiftTable,
}

impl StepSequencer {
    pub fn new(shifts: ShiftTable) -> Self {
        Self { shifts }
    }

    pub fn shifts(&self) -> &ShiftTable {
        &self.shifts
    }

    /// 构建有效步骤序列
    ///
    /// # 参数
    /// - `configs`: 工段配置（顺序即遍历顺序）
    /// - `staffing`: 排班总览行（同一工段重复时取第一条）
    /// - `current`: 当前打开的步骤，即使 0 人也会保留
    #[instrument(skip(self, configs, staffing), fields(configs = configs.len(), rows = staffing.len()))]
    pub fn build_valid_steps(
        &self,
        configs: &[SectorConfig],
        staffing: &[SectorStaffing],
        current: Option<&StepPosition>,
    ) -> Vec<WorkItem> {
        let mut steps = Vec::new();

        for config in configs {
            let row = staffing.iter().find(|s| s.config_id == config.config_id);
            if row.is_none() {
                debug!(config_id = config.config_id, "工段缺少排班行，按 0 人处理");
            }

            for shift in self.shifts.iter() {
                let operators = row.map(|r| r.operators(shift.id)).unwrap_or(0);
                let is_current = current
                    .map(|c| c.config_id == config.config_id && c.shift_id == shift.id)
                    .unwrap_or(false);

                if operators > 0 || is_current {
                    steps.push(WorkItem {
                        config_id: config.config_id,
                        shift_id: shift.id,
                        sector_name: config.sector_name.clone(),
                        shift_label: shift.label.clone(),
                    });
                }
            }
        }

        debug!(steps = steps.len(), "有效步骤已生成");
        steps
    }

    /// 计算当前步骤之后的下一步
    ///
    /// 当前步骤为最后一项或不在序列中时返回 `NextStep::Finish`
    pub fn next(&self, valid_steps: &[WorkItem], current: &StepPosition) -> NextStep {
        let index = match valid_steps.iter().position(|s| s.is_at(current)) {
            Some(i) => i,
            None => return NextStep::Finish,
        };

        match valid_steps.get(index + 1) {
            Some(item) if item.config_id != current.config_id => NextStep::Sector(item.clone()),
            Some(item) => NextStep::Shift(item.clone()),
            None => NextStep::Finish,
        }
    }

    /// 构建序列并计算下一步（状态变化后调用）
    pub fn advance(
        &self,
        configs: &[SectorConfig],
        staffing: &[SectorStaffing],
        current: &StepPosition,
    ) -> NextStep {
        let steps = self.build_valid_steps(configs, staffing, Some(current));
        self.next(&steps, current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ShiftId, ShiftStatus};
    use crate::engine::shift_table::ShiftDefinition;
    use chrono::NaiveTime;

    fn table() -> ShiftTable {
        let t = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        ShiftTable::from_definitions(
            ShiftId::ALL
                .iter()
                .map(|id| ShiftDefinition {
                    id: *id,
                    label: id.as_str().to_uppercase(),
                    start: t,
                    end: t,
                    break_deduction_minutes: 0,
                })
                .collect(),
        )
        .unwrap()
    }

    fn config(config_id: i64, name: &str) -> SectorConfig {
        SectorConfig {
            config_id,
            sector_name: name.to_string(),
            operators_required: 2,
        }
    }

    fn staffing(config_id: i64, ops: [i64; 4]) -> SectorStaffing {
        let mut row = SectorStaffing {
            config_id,
            ..Default::default()
        };
        for (shift, n) in ShiftId::ALL.iter().zip(ops) {
            row.set_shift(*shift, n, ShiftStatus::Empty);
        }
        row
    }

    fn positions(steps: &[WorkItem]) -> Vec<(i64, ShiftId)> {
        steps.iter().map(|s| (s.config_id, s.shift_id)).collect()
    }

    #[test]
    fn test_skips_unstaffed_shifts() {
        let sequencer = StepSequencer::new(table());
        let configs = vec![config(1, "Taglio"), config(2, "Incollaggio")];
        let rows = vec![staffing(1, [2, 0, 1, 0]), staffing(2, [0, 0, 0, 3])];

        let steps = sequencer.build_valid_steps(&configs, &rows, None);
        assert_eq!(
            positions(&steps),
            vec![
                (1, ShiftId::Morning),
                (1, ShiftId::Night),
                (2, ShiftId::Custom),
            ]
        );
        assert_eq!(steps[0].shift_label, "MORNING");
        assert_eq!(steps[2].sector_name, "Incollaggio");
    }

    #[test]
    fn test_current_item_kept_even_when_empty() {
        let sequencer = StepSequencer::new(table());
        let configs = vec![config(1, "Taglio")];
        let rows = vec![staffing(1, [1, 0, 0, 1])];
        let current = StepPosition::new(1, ShiftId::Afternoon);

        let steps = sequencer.build_valid_steps(&configs, &rows, Some(&current));
        assert_eq!(
            positions(&steps),
            vec![
                (1, ShiftId::Morning),
                (1, ShiftId::Afternoon),
                (1, ShiftId::Custom),
            ]
        );
    }

    #[test]
    fn test_missing_row_contributes_nothing() {
        let sequencer = StepSequencer::new(table());
        let configs = vec![config(1, "Taglio"), config(2, "Imballo")];
        let rows = vec![staffing(2, [1, 0, 0, 0])];

        let steps = sequencer.build_valid_steps(&configs, &rows, None);
        assert_eq!(positions(&steps), vec![(2, ShiftId::Morning)]);
    }

    #[test]
    fn test_next_classifies_transitions() {
        let sequencer = StepSequencer::new(table());
        let configs = vec![config(1, "Taglio"), config(2, "Imballo")];
        let rows = vec![staffing(1, [1, 1, 0, 0]), staffing(2, [1, 0, 0, 0])];
        let steps = sequencer.build_valid_steps(&configs, &rows, None);

        let next = sequencer.next(&steps, &StepPosition::new(1, ShiftId::Morning));
        assert!(matches!(&next, NextStep::Shift(item) if item.shift_id == ShiftId::Afternoon));

        let next = sequencer.next(&steps, &StepPosition::new(1, ShiftId::Afternoon));
        assert!(matches!(&next, NextStep::Sector(item) if item.config_id == 2));

        let next = sequencer.next(&steps, &StepPosition::new(2, ShiftId::Morning));
        assert_eq!(next, NextStep::Finish);
    }

    #[test]
    fn test_next_unknown_current_is_finish() {
        let sequencer = StepSequencer::new(table());
        let configs = vec![config(1, "Taglio")];
        let rows = vec![staffing(1, [1, 0, 0, 0])];
        let steps = sequencer.build_valid_steps(&configs, &rows, None);

        let next = sequencer.next(&steps, &StepPosition::new(9, ShiftId::Night));
        assert!(next.is_finish());
        assert!(sequencer
            .next(&[], &StepPosition::new(1, ShiftId::Morning))
            .is_finish());
    }

    #[test]
    fn test_advance_from_empty_current_moves_to_next_staffed_sector() {
        let sequencer = StepSequencer::new(table());
        let configs = vec![config(1, "Taglio"), config(2, "Imballo")];
        let rows = vec![staffing(1, [0, 0, 0, 0]), staffing(2, [0, 2, 0, 0])];

        let next = sequencer.advance(&configs, &rows, &StepPosition::new(1, ShiftId::Night));
        assert!(matches!(&next, NextStep::Sector(item) if item.shift_id == ShiftId::Afternoon));
    }
}
