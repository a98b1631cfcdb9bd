// ==========================================
// 车间管理系统 - 切块规划 API
// ==========================================
// 职责:
// - 校验订单参数，调用服务端切块计算
// - 按 (物料大类, 物料ID) 取回收规则并匹配每块余料
// - 输出界面可直接展示的建议文本
// 说明: 切块计算公式在服务端，此处只依赖 BlockMathService 契约
// ==========================================

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::catalog::RecoveryCatalog;
use crate::domain::block::{BlockMathRequest, BlockMathResult};
use crate::domain::recovery::RecoveryMatch;
use crate::domain::types::MaterialCategory;
use crate::engine::recovery_matcher::{MatchStage, RecoveryMatcher};
use crate::i18n;

// ==========================================
// BlockMathService Trait
// ==========================================
// 实现者: 服务端接口适配器
#[async_trait]
pub trait BlockMathService: Send + Sync {
    async fn compute(&self, request: &BlockMathRequest) -> anyhow::Result<BlockMathResult>;
}

/// 回收建议
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverySuggestion {
    pub remainder_cm: f64,
    pub recovery: Option<RecoveryMatch>,
    pub stage: Option<MatchStage>,
    /// 本地化建议文本
    pub suggestion: String,
}

impl RecoverySuggestion {
    /// 是否需要主管介入（有余料但无标准回收）
    pub fn needs_supervisor(&self) -> bool {
        self.recovery.is_none() && self.remainder_cm > 0.0
    }
}

/// 订单切块规划结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuttingPlan {
    pub block: BlockMathResult,
    pub recovery: Option<RecoveryMatch>,
    pub stage: Option<MatchStage>,
    pub suggestion: String,
}

// ==========================================
// CuttingPlanApi
// ==========================================
pub struct CuttingPlanApi {
    block_math: Arc<dyn BlockMathService>,
    catalog: Arc<dyn RecoveryCatalog>,
    matcher: RecoveryMatcher,
}

impl CuttingPlanApi {
    pub fn new(
        block_math: Arc<dyn BlockMathService>,
        catalog: Arc<dyn RecoveryCatalog>,
        matcher: RecoveryMatcher,
    ) -> Self {
        Self {
            block_math,
            catalog,
            matcher,
        }
    }

    /// 订单规划：切块计算 + 余料回收建议
    #[instrument(skip(self, request), fields(category = %request.material_category))]
    pub async fn plan_order(
        &self,
        request: &BlockMathRequest,
        material_id: i64,
    ) -> ApiResult<CuttingPlan> {
        validate_request(request)?;

        let block = self
            .block_math
            .compute(request)
            .await
            .map_err(|e| {
                warn!(error = %e, "切块计算服务调用失败");
                ApiError::collaborator("block_math", &e)
            })?;

        if !block.remainder_per_block_cm.is_finite() {
            return Err(ApiError::Collaborator {
                service: "block_math".to_string(),
                message: format!("余料厚度无效: {}", block.remainder_per_block_cm),
            });
        }

        let suggestion = self
            .suggest_recovery(
                &request.material_category,
                material_id,
                block.remainder_per_block_cm,
            )
            .await?;

        info!(
            blocks_needed = block.blocks_needed,
            remainder_cm = block.remainder_per_block_cm,
            stage = ?suggestion.stage,
            "订单规划完成"
        );

        Ok(CuttingPlan {
            block,
            recovery: suggestion.recovery,
            stage: suggestion.stage,
            suggestion: suggestion.suggestion,
        })
    }

    /// 已知余料厚度时直接给出回收建议
    pub async fn suggest_recovery(
        &self,
        category: &MaterialCategory,
        material_id: i64,
        remainder_cm: f64,
    ) -> ApiResult<RecoverySuggestion> {
        if remainder_cm <= 0.0 {
            return Ok(RecoverySuggestion {
                remainder_cm,
                recovery: None,
                stage: None,
                suggestion: i18n::t("recovery.no_offcut"),
            });
        }

        let rules = self.catalog.list_rules(category, material_id).await?;
        let matched = self.matcher.match_with_stage(remainder_cm, &rules);
        let (stage, recovery) = match matched {
            Some((stage, m)) => (Some(stage), Some(m)),
            None => (None, None),
        };

        Ok(RecoverySuggestion {
            remainder_cm,
            suggestion: describe(recovery.as_ref()),
            recovery,
            stage,
        })
    }

    /// 作用域无规则时写入默认规则，返回写入条数
    pub async fn ensure_catalog(
        &self,
        category: &MaterialCategory,
        material_id: i64,
    ) -> ApiResult<usize> {
        Ok(self.catalog.seed_defaults(category, material_id).await?)
    }
}

fn validate_request(request: &BlockMathRequest) -> ApiResult<()> {
    let positive = |field: &str, value: f64| {
        if value.is_finite() && value > 0.0 {
            Ok(())
        } else {
            Err(ApiError::invalid_input(field, format!("必须为正数，实际 {}", value)))
        }
    };

    positive("sheetThicknessCm", request.sheet_thickness_cm)?;
    positive("blockHeightCm", request.block_height_cm)?;
    if request.quantity == 0 {
        return Err(ApiError::invalid_input("quantity", "必须 >= 1"));
    }
    Ok(())
}

/// 生成建议文本
pub fn describe(recovery: Option<&RecoveryMatch>) -> String {
    let m = match recovery {
        Some(m) => m,
        None => return i18n::t("recovery.no_match"),
    };

    let thickness = format_cm(m.rule.thickness_cm);
    if m.is_combination {
        let count = m.count.to_string();
        let leftover = format_cm(m.leftover_cm);
        i18n::t_with_args(
            "recovery.combination",
            &[
                ("count", count.as_str()),
                ("product", m.rule.product_type.as_str()),
                ("thickness", thickness.as_str()),
                ("leftover", leftover.as_str()),
            ],
        )
    } else {
        i18n::t_with_args(
            "recovery.single",
            &[
                ("product", m.rule.product_type.as_str()),
                ("thickness", thickness.as_str()),
            ],
        )
    }
}

/// 厚度显示：最多两位小数，去掉末尾 0
pub fn format_cm(value: f64) -> String {
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
