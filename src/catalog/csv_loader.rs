// ==========================================
// 车间管理系统 - 回收规则 CSV 导入
// ==========================================
// 表头: category,material_id,thickness_cm,product_type,notes
// 规则: 空行跳过；字段去空格；厚度非正/无法解析 → 报错并指明行号
// ==========================================

use crate::catalog::error::{CatalogError, CatalogResult};
use crate::catalog::recovery_catalog::InMemoryRecoveryCatalog;
use crate::domain::recovery::RecoveryRule;
use crate::domain::types::MaterialCategory;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument};

const REQUIRED_COLUMNS: [&str; 4] = ["category", "material_id", "thickness_cm", "product_type"];

/// CSV 中的一条规则（带作用域）
#[derive(Debug, Clone, PartialEq)]
pub struct ScopedRule {
    pub category: MaterialCategory,
    pub material_id: i64,
    pub rule: RecoveryRule,
}

/// 从文件解析规则
pub fn parse_rules_file(path: &Path) -> CatalogResult<Vec<ScopedRule>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound(path.display().to_string()));
    }

    if let Some(ext) = path.extension() {
        if ext != "csv" {
            return Err(CatalogError::UnsupportedFormat(
                ext.to_string_lossy().to_string(),
            ));
        }
    }

    let file = File::open(path)?;
    parse_rules(file)
}

/// 从任意 reader 解析规则（行号从 1 开始，不含表头）
pub fn parse_rules<R: Read>(reader: R) -> CatalogResult<Vec<ScopedRule>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许 notes 列缺省
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CatalogError::MissingColumn(column.to_string()));
        }
    }

    let mut rules = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row = row_idx + 1;
        let record = result?;

        let mut row_map: HashMap<&str, String> = HashMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.as_str(), value.trim().to_string());
            }
        }

        // 跳过完全空白的行
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }

        rules.push(map_row(row, &row_map)?);
    }

    Ok(rules)
}

fn map_row(row: usize, fields: &HashMap<&str, String>) -> CatalogResult<ScopedRule> {
    let field = |name: &str| fields.get(name).map(String::as_str).unwrap_or("");
    let field_error = |name: &str, message: String| CatalogError::FieldValueError {
        row,
        field: name.to_string(),
        message,
    };

    let category: MaterialCategory = field("category")
        .parse()
        .map_err(|e: String| field_error("category", e))?;

    let material_id: i64 = field("material_id")
        .parse()
        .map_err(|_| field_error("material_id", format!("无法解析: '{}'", field("material_id"))))?;

    let thickness_cm: f64 = field("thickness_cm")
        .parse()
        .map_err(|_| field_error("thickness_cm", format!("无法解析: '{}'", field("thickness_cm"))))?;
    if !thickness_cm.is_finite() || thickness_cm <= 0.0 {
        return Err(field_error(
            "thickness_cm",
            format!("厚度必须为正数: {}", thickness_cm),
        ));
    }

    let product_type = field("product_type");
    if product_type.is_empty() {
        return Err(field_error("product_type", "产品类型为空".to_string()));
    }

    let notes = match field("notes") {
        "" => None,
        n => Some(n.to_string()),
    };

    Ok(ScopedRule {
        category,
        material_id,
        rule: RecoveryRule {
            thickness_cm,
            product_type: product_type.to_string(),
            notes,
        },
    })
}

/// 导入 CSV 到内存目录（按文件顺序追加）
///
/// # 返回
/// - 导入的规则条数
#[instrument(skip(catalog))]
pub fn load_into(catalog: &InMemoryRecoveryCatalog, path: &Path) -> CatalogResult<usize> {
    let scoped = parse_rules_file(path)?;
    let mut total = 0;
    for entry in scoped {
        total += catalog.append_rules(&entry.category, entry.material_id, vec![entry.rule])?;
    }
    info!(total, "回收规则导入完成");
    Ok(total)
}
