// ==========================================
// 车间管理系统 - KPI 录入领域模型
// ==========================================
// 职责: 每日 KPI 录入记录 + 某工作日的排班快照
// 主键: (config_id, work_date, shift_id)
// ==========================================

use crate::domain::staffing::{SectorConfig, SectorStaffing, StepPosition};
use crate::domain::types::ShiftId;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// KPI 录入记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiEntry {
    pub config_id: i64,
    pub work_date: NaiveDate,
    pub shift_id: ShiftId,
    /// 指标名 → 数值（件数、废品、停机分钟等）
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl KpiEntry {
    pub fn new(config_id: i64, work_date: NaiveDate, shift_id: ShiftId) -> Self {
        Self {
            config_id,
            work_date,
            shift_id,
            metrics: BTreeMap::new(),
            notes: None,
        }
    }

    pub fn with_metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), value);
        self
    }

    pub fn position(&self) -> StepPosition {
        StepPosition::new(self.config_id, self.shift_id)
    }
}

/// 某工作日的工段配置 + 排班总览快照
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySnapshot {
    #[serde(default)]
    pub configs: Vec<SectorConfig>,
    /// 无法解析的行整行丢弃（按 0 人处理），不影响其他行
    #[serde(default, deserialize_with = "skip_malformed_rows")]
    pub staffing: Vec<SectorStaffing>,
}

impl DaySnapshot {
    pub fn new(configs: Vec<SectorConfig>, staffing: Vec<SectorStaffing>) -> Self {
        Self { configs, staffing }
    }

    pub fn config(&self, config_id: i64) -> Option<&SectorConfig> {
        self.configs.iter().find(|c| c.config_id == config_id)
    }

    /// 查找工段的排班行（重复行取第一条）
    pub fn staffing_for(&self, config_id: i64) -> Option<&SectorStaffing> {
        self.staffing.iter().find(|s| s.config_id == config_id)
    }
}

fn skip_malformed_rows<'de, D>(deserializer: D) -> Result<Vec<SectorStaffing>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = match Value::deserialize(deserializer)? {
        Value::Array(rows) => rows,
        Value::Null => Vec::new(),
        other => {
            warn!(value = %other, "排班总览不是数组，按空表处理");
            Vec::new()
        }
    };

    let mut staffing = Vec::with_capacity(rows.len());
    for (index, raw) in rows.into_iter().enumerate() {
        match serde_json::from_value::<SectorStaffing>(raw) {
            Ok(row) => staffing.push(row),
            Err(e) => warn!(index, error = %e, "排班行无法解析，已丢弃"),
        }
    }
    Ok(staffing)
}
