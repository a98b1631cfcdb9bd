// ==========================================
// 车间管理系统 - 回收规则目录
// ==========================================
// 职责: 按 (物料大类, 物料ID) 提供回收规则，支持默认规则初始化
// 实现: InMemoryRecoveryCatalog（进程内，持久化由外部服务负责）
// ==========================================

use crate::catalog::default_rules::default_rules;
use crate::catalog::error::{CatalogError, CatalogResult};
use crate::domain::recovery::RecoveryRule;
use crate::domain::types::MaterialCategory;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::{debug, info};

// ==========================================
// RecoveryCatalog Trait
// ==========================================
// 实现者: InMemoryRecoveryCatalog / 服务端适配器
#[async_trait]
pub trait RecoveryCatalog: Send + Sync {
    /// 获取作用域内的规则（保持目录顺序；未知作用域返回空）
    async fn list_rules(
        &self,
        category: &MaterialCategory,
        material_id: i64,
    ) -> CatalogResult<Vec<RecoveryRule>>;

    /// 作用域为空时写入默认规则
    ///
    /// # 返回
    /// - 写入条数；已有规则时为 0（幂等）
    async fn seed_defaults(
        &self,
        category: &MaterialCategory,
        material_id: i64,
    ) -> CatalogResult<usize>;

    /// 新增或替换规则（厚度 + 产品类型相同视为同一规则）
    async fn upsert_rule(
        &self,
        category: &MaterialCategory,
        material_id: i64,
        rule: RecoveryRule,
    ) -> CatalogResult<()>;
}

type ScopeKey = (MaterialCategory, i64);

// ==========================================
// InMemoryRecoveryCatalog
// ==========================================
#[derive(Debug, Default)]
pub struct InMemoryRecoveryCatalog {
    scopes: RwLock<HashMap<ScopeKey, Vec<RecoveryRule>>>,
}

impl InMemoryRecoveryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加规则到作用域末尾（导入使用，保持文件顺序）
    pub fn append_rules(
        &self,
        category: &MaterialCategory,
        material_id: i64,
        rules: Vec<RecoveryRule>,
    ) -> CatalogResult<usize> {
        if let Some(bad) = rules.iter().find(|r| !r.is_valid()) {
            return Err(CatalogError::InvalidRule(format!(
                "thickness_cm={} product_type={}",
                bad.thickness_cm, bad.product_type
            )));
        }

        let mut scopes = self
            .scopes
            .write()
            .map_err(|e| CatalogError::LockError(e.to_string()))?;
        let count = rules.len();
        scopes
            .entry((category.clone(), material_id))
            .or_default()
            .extend(rules);
        Ok(count)
    }

    /// 作用域数量
    pub fn scope_count(&self) -> CatalogResult<usize> {
        let scopes = self
            .scopes
            .read()
            .map_err(|e| CatalogError::LockError(e.to_string()))?;
        Ok(scopes.len())
    }
}

#[async_trait]
impl RecoveryCatalog for InMemoryRecoveryCatalog {
    async fn list_rules(
        &self,
        category: &MaterialCategory,
        material_id: i64,
    ) -> CatalogResult<Vec<RecoveryRule>> {
        let scopes = self
            .scopes
            .read()
            .map_err(|e| CatalogError::LockError(e.to_string()))?;
        Ok(scopes
            .get(&(category.clone(), material_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn seed_defaults(
        &self,
        category: &MaterialCategory,
        material_id: i64,
    ) -> CatalogResult<usize> {
        let mut scopes = self
            .scopes
            .write()
            .map_err(|e| CatalogError::LockError(e.to_string()))?;

        let existing = scopes.entry((category.clone(), material_id)).or_default();
        if !existing.is_empty() {
            debug!(%category, material_id, "目录已有规则，跳过初始化");
            return Ok(0);
        }

        existing.extend(default_rules(category));
        let inserted = existing.len();
        info!(%category, material_id, inserted, "已写入默认回收规则");
        Ok(inserted)
    }

    async fn upsert_rule(
        &self,
        category: &MaterialCategory,
        material_id: i64,
        rule: RecoveryRule,
    ) -> CatalogResult<()> {
        if !rule.is_valid() {
            return Err(CatalogError::InvalidRule(format!(
                "thickness_cm={} 必须为正数",
                rule.thickness_cm
            )));
        }

        let mut scopes = self
            .scopes
            .write()
            .map_err(|e| CatalogError::LockError(e.to_string()))?;
        let rules = scopes.entry((category.clone(), material_id)).or_default();

        match rules.iter_mut().find(|r| {
            r.thickness_cm == rule.thickness_cm && r.product_type == rule.product_type
        }) {
            Some(existing) => *existing = rule,
            None => rules.push(rule),
        }
        Ok(())
    }
}
