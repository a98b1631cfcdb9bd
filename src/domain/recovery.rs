// ==========================================
// 车间管理系统 - 回收规则领域模型
// ==========================================
// 职责: 回收规则 (RecoveryRule) 与匹配结果 (RecoveryMatch)
// 说明: 规则由调用方按 (物料大类, 物料ID) 预先筛选，匹配器本身与物料无关
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RecoveryRule - 回收规则
// ==========================================
// 含义: 某一厚度可切出的已知产品
// 约束: thickness_cm > 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryRule {
    pub thickness_cm: f64,
    pub product_type: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RecoveryRule {
    pub fn new(thickness_cm: f64, product_type: &str) -> Self {
        Self {
            thickness_cm,
            product_type: product_type.to_string(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// 厚度是否可用于匹配（有限且为正）
    pub fn is_valid(&self) -> bool {
        self.thickness_cm.is_finite() && self.thickness_cm > 0.0
    }
}

// ==========================================
// RecoveryMatch - 回收匹配结果
// ==========================================
// count: 规则厚度可放入余料的次数
// leftover_cm: 无法再回收的部分 (>= 0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoveryMatch {
    pub rule: RecoveryRule,
    pub is_combination: bool,
    pub count: u32,
    pub leftover_cm: f64,
}

impl RecoveryMatch {
    /// 单件匹配（精确或近似）
    pub fn single(rule: RecoveryRule) -> Self {
        Self {
            rule,
            is_combination: false,
            count: 1,
            leftover_cm: 0.0,
        }
    }

    /// 组合匹配（同一规则切多片）
    pub fn combination(rule: RecoveryRule, count: u32, leftover_cm: f64) -> Self {
        Self {
            rule,
            is_combination: true,
            count,
            leftover_cm,
        }
    }
}
