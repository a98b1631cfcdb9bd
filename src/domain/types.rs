// ==========================================
// 车间管理系统 - 领域类型定义
// ==========================================
// 职责: 班次、班次填报状态、物料大类等枚举
// 序列化格式: 小写 (与服务端接口一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 班次标识 (Shift Id)
// ==========================================
// 固定顺序: morning → afternoon → night → custom
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftId {
    Morning,   // 早班
    Afternoon, // 中班
    Night,     // 夜班
    Custom,    // 中央班 08:00-17:00
}

impl ShiftId {
    /// 固定遍历顺序
    pub const ALL: [ShiftId; 4] = [
        ShiftId::Morning,
        ShiftId::Afternoon,
        ShiftId::Night,
        ShiftId::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftId::Morning => "morning",
            ShiftId::Afternoon => "afternoon",
            ShiftId::Night => "night",
            ShiftId::Custom => "custom",
        }
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShiftId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(ShiftId::Morning),
            "afternoon" => Ok(ShiftId::Afternoon),
            "night" => Ok(ShiftId::Night),
            "custom" => Ok(ShiftId::Custom),
            other => Err(format!("未知班次: {}", other)),
        }
    }
}

// ==========================================
// 班次填报状态 (Shift Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    #[default]
    Empty,    // 未填报
    Partial,  // 部分填报
    Complete, // 已完成
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftStatus::Empty => write!(f, "empty"),
            ShiftStatus::Partial => write!(f, "partial"),
            ShiftStatus::Complete => write!(f, "complete"),
        }
    }
}

// ==========================================
// 物料大类 (Material Category)
// ==========================================
// 回收规则按 (大类, 物料ID) 划分作用域
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialCategory {
    Foam,   // 聚氨酯海绵
    Memory, // 记忆棉
    Latex,  // 乳胶
    Other(String),
}

impl MaterialCategory {
    pub fn as_str(&self) -> &str {
        match self {
            MaterialCategory::Foam => "foam",
            MaterialCategory::Memory => "memory",
            MaterialCategory::Latex => "latex",
            MaterialCategory::Other(name) => name.as_str(),
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MaterialCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "" => Err("物料大类为空".to_string()),
            "foam" => Ok(MaterialCategory::Foam),
            "memory" => Ok(MaterialCategory::Memory),
            "latex" => Ok(MaterialCategory::Latex),
            _ => Ok(MaterialCategory::Other(name)),
        }
    }
}

// ==========================================
// 步骤跳转类型 (Transition Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    Shift,  // 同一工段内切换班次
    Sector, // 切换到下一个工段
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionKind::Shift => write!(f, "shift"),
            TransitionKind::Sector => write!(f, "sector"),
        }
    }
}
