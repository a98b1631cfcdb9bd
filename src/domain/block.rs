// ==========================================
// 车间管理系统 - 切块计算契约
// ==========================================
// 职责: 服务端"每块出片数"计算的输入/输出
// 说明: 计算公式在服务端，此处只定义契约
// ==========================================

use crate::domain::types::MaterialCategory;
use serde::{Deserialize, Serialize};

/// 切块计算请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMathRequest {
    pub material_category: MaterialCategory,
    pub sheet_thickness_cm: f64,
    pub quantity: u32,
    pub block_height_cm: f64,
}

/// 切块计算结果
///
/// `remainder_per_block_cm` 是回收匹配唯一需要的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockMathResult {
    pub blocks_needed: u32,
    pub sheets_per_block: u32,
    pub total_sheets: u32,
    pub extra_sheets: u32,
    pub remainder_per_block_cm: f64,
}
