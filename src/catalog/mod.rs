// ==========================================
// 车间管理系统 - 回收规则目录层
// ==========================================
// 职责: 回收规则的作用域管理、默认规则初始化、CSV 导入
// 说明: 匹配器只接收已按 (物料大类, 物料ID) 筛选的规则
// ==========================================

pub mod csv_loader;
pub mod default_rules;
pub mod error;
pub mod recovery_catalog;

pub use csv_loader::{load_into, parse_rules, parse_rules_file, ScopedRule};
pub use default_rules::default_rules;
pub use error::{CatalogError, CatalogResult};
pub use recovery_catalog::{InMemoryRecoveryCatalog, RecoveryCatalog};
