// ==========================================
// 车间管理系统 - 排班总览汇总
// ==========================================
// 职责: 按工段统计有人班次的填报进度（empty / partial / complete）
// 说明: 0 人班次不计入进度
// ==========================================

use crate::domain::entry::DaySnapshot;
use crate::domain::types::{ShiftId, ShiftStatus};
use serde::{Deserialize, Serialize};

/// 单个工段的填报进度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorProgress {
    pub config_id: i64,
    pub sector_name: String,
    pub staffed_shifts: u32,
    pub complete: u32,
    pub partial: u32,
    pub empty: u32,
}

impl SectorProgress {
    pub fn is_complete(&self) -> bool {
        self.complete == self.staffed_shifts
    }
}

/// 某工作日的总览
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffingOverview {
    pub sectors: Vec<SectorProgress>,
}

impl StaffingOverview {
    pub fn from_snapshot(snapshot: &DaySnapshot) -> Self {
        let sectors = snapshot
            .configs
            .iter()
            .map(|config| {
                let mut progress = SectorProgress {
                    config_id: config.config_id,
                    sector_name: config.sector_name.clone(),
                    staffed_shifts: 0,
                    complete: 0,
                    partial: 0,
                    empty: 0,
                };

                if let Some(row) = snapshot.staffing_for(config.config_id) {
                    for shift in ShiftId::ALL {
                        if row.operators(shift) == 0 {
                            continue;
                        }
                        progress.staffed_shifts += 1;
                        match row.status(shift) {
                            ShiftStatus::Complete => progress.complete += 1,
                            ShiftStatus::Partial => progress.partial += 1,
                            ShiftStatus::Empty => progress.empty += 1,
                        }
                    }
                }

                progress
            })
            .collect();

        Self { sectors }
    }

    pub fn staffed_shifts(&self) -> u32 {
        self.sectors.iter().map(|s| s.staffed_shifts).sum()
    }

    pub fn has_work(&self) -> bool {
        self.staffed_shifts() > 0
    }

    /// 所有有人班次均已完成（无人班次时为 true）
    pub fn is_day_complete(&self) -> bool {
        self.sectors.iter().all(SectorProgress::is_complete)
    }
}
