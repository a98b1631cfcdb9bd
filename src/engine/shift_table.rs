// ==========================================
// 车间管理系统 - 班次常量表
// ==========================================
// 固定顺序: morning → afternoon → night → custom
// custom = 中央班 08:00-17:00，扣除 1 小时休息（由界面计算工时使用）
// ==========================================

use crate::domain::types::ShiftId;
use crate::i18n;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// 单个班次定义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    pub id: ShiftId,
    pub label: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// 计算工时时扣除的休息分钟数
    pub break_deduction_minutes: u32,
}

impl ShiftDefinition {
    /// 班次跨度（分钟），结束早于开始视为跨午夜
    pub fn span_minutes(&self) -> u32 {
        let start = self.start.num_seconds_from_midnight() / 60;
        let end = self.end.num_seconds_from_midnight() / 60;
        if end > start {
            end - start
        } else {
            MINUTES_PER_DAY - start + end
        }
    }

    /// 有效工时（分钟）= 跨度 - 休息扣除
    pub fn worked_minutes(&self) -> u32 {
        self.span_minutes()
            .saturating_sub(self.break_deduction_minutes)
    }

    pub fn worked_hours(&self) -> f64 {
        self.worked_minutes() as f64 / 60.0
    }
}

/// 班次表构建错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShiftTableError {
    #[error("班次表缺少班次: {0}")]
    MissingShift(ShiftId),
}

/// 班次表（顺序即遍历顺序）
///
/// 不变量: 每个 ShiftId 恰好一条，否则当前步骤可能无处可放
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftTable {
    shifts: Vec<ShiftDefinition>,
}

impl ShiftTable {
    /// 标准四班制，标签按当前语言解析
    pub fn standard() -> Self {
        Self {
            shifts: ShiftId::ALL
                .iter()
                .map(|id| standard_definition(*id, i18n::t(&format!("shift.{}", id.as_str()))))
                .collect(),
        }
    }

    /// 自定义班次表，按 ShiftId 固定顺序排列，重复班次保留第一条
    ///
    /// 必须覆盖全部班次，缺任何一个返回 `ShiftTableError::MissingShift`
    pub fn from_definitions(
        mut definitions: Vec<ShiftDefinition>,
    ) -> Result<Self, ShiftTableError> {
        definitions.sort_by_key(|d| d.id);
        definitions.dedup_by_key(|d| d.id);

        if let Some(missing) = ShiftId::ALL
            .iter()
            .find(|id| !definitions.iter().any(|d| d.id == **id))
        {
            return Err(ShiftTableError::MissingShift(*missing));
        }

        Ok(Self {
            shifts: definitions,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShiftDefinition> {
        self.shifts.iter()
    }

    pub fn get(&self, id: ShiftId) -> Option<&ShiftDefinition> {
        self.shifts.iter().find(|d| d.id == id)
    }
}

impl Default for ShiftTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_definition(id: ShiftId, label: String) -> ShiftDefinition {
    let (start, end, break_deduction_minutes) = match id {
        ShiftId::Morning => (hm(6, 0), hm(14, 0), 0),
        ShiftId::Afternoon => (hm(14, 0), hm(22, 0), 0),
        ShiftId::Night => (hm(22, 0), hm(6, 0), 0),
        ShiftId::Custom => (hm(8, 0), hm(17, 0), 60),
    };
    ShiftDefinition {
        id,
        label,
        start,
        end,
        break_deduction_minutes,
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}
