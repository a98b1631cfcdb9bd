// ==========================================
// 车间管理系统 - 工段排班领域模型
// ==========================================
// 职责: 工段配置、排班总览行 (Panoramica)、录入步骤
// 生命周期: 每次从服务端重新加载时整体替换，客户端不做增量修改
// ==========================================

use crate::domain::types::{ShiftId, ShiftStatus, TransitionKind};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ==========================================
// SectorConfig - 工段配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorConfig {
    pub config_id: i64,
    pub sector_name: String,
    #[serde(default)]
    pub operators_required: u32,
}

// ==========================================
// SectorStaffing - 排班总览行
// ==========================================
// 每个班次: <shift>_ops 人数 + <shift>_status 填报状态
// 缺失字段按 0 人 / empty 处理；负数人数视为 0
// configId 无法解析的行由 DaySnapshot 整行丢弃
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorStaffing {
    pub config_id: i64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sector_name: String,
    #[serde(default, deserialize_with = "lenient_required")]
    pub operators_required: u32,

    #[serde(default, rename = "morning_ops", deserialize_with = "lenient_ops")]
    pub morning_ops: i64,
    #[serde(default, rename = "morning_status", deserialize_with = "lenient_status")]
    pub morning_status: ShiftStatus,

    #[serde(default, rename = "afternoon_ops", deserialize_with = "lenient_ops")]
    pub afternoon_ops: i64,
    #[serde(default, rename = "afternoon_status", deserialize_with = "lenient_status")]
    pub afternoon_status: ShiftStatus,

    #[serde(default, rename = "night_ops", deserialize_with = "lenient_ops")]
    pub night_ops: i64,
    #[serde(default, rename = "night_status", deserialize_with = "lenient_status")]
    pub night_status: ShiftStatus,

    #[serde(default, rename = "custom_ops", deserialize_with = "lenient_ops")]
    pub custom_ops: i64,
    #[serde(default, rename = "custom_status", deserialize_with = "lenient_status")]
    pub custom_status: ShiftStatus,
}

impl SectorStaffing {
    /// 指定班次的在岗人数（负数按 0 处理）
    pub fn operators(&self, shift: ShiftId) -> u32 {
        let raw = match shift {
            ShiftId::Morning => self.morning_ops,
            ShiftId::Afternoon => self.afternoon_ops,
            ShiftId::Night => self.night_ops,
            ShiftId::Custom => self.custom_ops,
        };
        u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
    }

    pub fn status(&self, shift: ShiftId) -> ShiftStatus {
        match shift {
            ShiftId::Morning => self.morning_status,
            ShiftId::Afternoon => self.afternoon_status,
            ShiftId::Night => self.night_status,
            ShiftId::Custom => self.custom_status,
        }
    }

    /// 设置班次人数与状态（测试数据构建/服务端适配使用）
    pub fn set_shift(&mut self, shift: ShiftId, ops: i64, status: ShiftStatus) {
        match shift {
            ShiftId::Morning => {
                self.morning_ops = ops;
                self.morning_status = status;
            }
            ShiftId::Afternoon => {
                self.afternoon_ops = ops;
                self.afternoon_status = status;
            }
            ShiftId::Night => {
                self.night_ops = ops;
                self.night_status = status;
            }
            ShiftId::Custom => {
                self.custom_ops = ops;
                self.custom_status = status;
            }
        }
    }
}

// 服务端偶尔返回字符串/null 人数，无法解析时一律按 0 人
fn lenient_ops<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let ops = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    Ok(ops)
}

fn lenient_required<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let ops = lenient_ops(deserializer)?;
    Ok(u32::try_from(ops.max(0)).unwrap_or(u32::MAX))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let text = match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    };
    Ok(text)
}

fn lenient_status<'de, D>(deserializer: D) -> Result<ShiftStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let status = match value {
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "partial" => ShiftStatus::Partial,
            "complete" => ShiftStatus::Complete,
            _ => ShiftStatus::Empty,
        },
        _ => ShiftStatus::Empty,
    };
    Ok(status)
}

// ==========================================
// StepPosition - 当前打开的 (工段, 班次)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPosition {
    pub config_id: i64,
    pub shift_id: ShiftId,
}

impl StepPosition {
    pub fn new(config_id: i64, shift_id: ShiftId) -> Self {
        Self {
            config_id,
            shift_id,
        }
    }
}

// ==========================================
// WorkItem - 录入步骤（派生，不持久化）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub config_id: i64,
    pub shift_id: ShiftId,
    pub sector_name: String,
    pub shift_label: String,
}

impl WorkItem {
    pub fn position(&self) -> StepPosition {
        StepPosition::new(self.config_id, self.shift_id)
    }

    pub fn is_at(&self, position: &StepPosition) -> bool {
        self.config_id == position.config_id && self.shift_id == position.shift_id
    }
}

// ==========================================
// NextStep - 下一步
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "item", rename_all = "lowercase")]
pub enum NextStep {
    /// 同一工段的下一个班次
    Shift(WorkItem),
    /// 下一个工段
    Sector(WorkItem),
    /// 遍历完成
    Finish,
}

impl NextStep {
    pub fn item(&self) -> Option<&WorkItem> {
        match self {
            NextStep::Shift(item) | NextStep::Sector(item) => Some(item),
            NextStep::Finish => None,
        }
    }

    pub fn transition(&self) -> Option<TransitionKind> {
        match self {
            NextStep::Shift(_) => Some(TransitionKind::Shift),
            NextStep::Sector(_) => Some(TransitionKind::Sector),
            NextStep::Finish => None,
        }
    }

    pub fn is_finish(&self) -> bool {
        matches!(self, NextStep::Finish)
    }
}
