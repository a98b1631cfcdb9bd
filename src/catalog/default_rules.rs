// ==========================================
// 车间管理系统 - 默认回收规则
// ==========================================
// 用途: 目录为空时的初始化数据（seed）
// 单位: cm
// ==========================================

use crate::domain::recovery::RecoveryRule;
use crate::domain::types::MaterialCategory;

/// 按物料大类返回默认规则（目录顺序即匹配顺序）
pub fn default_rules(category: &MaterialCategory) -> Vec<RecoveryRule> {
    let table: &[(f64, &str, Option<&str>)] = match category {
        MaterialCategory::Foam => &[
            (1.0, "Pad", Some("imbottitura sottile")),
            (2.0, "Pad", None),
            (3.0, "Topper", None),
            (4.0, "Topper", None),
            (5.0, "Topper", Some("topper alto")),
        ],
        MaterialCategory::Memory => &[
            (2.0, "Topper", None),
            (3.0, "Topper", None),
            (5.0, "Cuscino", None),
            (7.0, "Cuscino", Some("cuscino alto")),
        ],
        MaterialCategory::Latex => &[
            (2.0, "Pad", None),
            (4.0, "Topper", None),
            (6.0, "Cuscino", None),
        ],
        MaterialCategory::Other(_) => &[],
    };

    table
        .iter()
        .map(|(thickness_cm, product_type, notes)| RecoveryRule {
            thickness_cm: *thickness_cm,
            product_type: product_type.to_string(),
            notes: notes.map(|n| n.to_string()),
        })
        .collect()
}
