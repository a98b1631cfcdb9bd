// ==========================================
// 车间管理系统 - 余料回收匹配引擎
// ==========================================
// 规则: 分级优先，命中即返回（不做全局最优）
//   1) 精确匹配  2) 近似匹配(容差内)  3) 精确组合(余量 < 上限)
//   4) 兜底组合(余量不设上限)  5) 无匹配 → None (交由主管处理)
// 红线: 每一级内部按"首个命中"取值，不得改为"距离最近"
// ==========================================

use crate::domain::recovery::{RecoveryMatch, RecoveryRule};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// 匹配器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryMatcherConfig {
    /// 近似匹配容差（cm，绝对值）
    pub close_tolerance_cm: f64,
    /// 精确组合允许的最大余量（cm，严格小于）
    pub combination_leftover_limit_cm: f64,
}

impl Default for RecoveryMatcherConfig {
    fn default() -> Self {
        Self {
            close_tolerance_cm: 0.5,
            combination_leftover_limit_cm: 1.0,
        }
    }
}

/// 命中的匹配阶段（用于日志与界面解释）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStage {
    Exact,
    Close,
    ExactCombination,
    FallbackCombination,
}

impl fmt::Display for MatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStage::Exact => write!(f, "EXACT"),
            MatchStage::Close => write!(f, "CLOSE"),
            MatchStage::ExactCombination => write!(f, "EXACT_COMBINATION"),
            MatchStage::FallbackCombination => write!(f, "FALLBACK_COMBINATION"),
        }
    }
}

// ==========================================
// RecoveryMatcher - 余料回收匹配器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RecoveryMatcher {
    config: RecoveryMatcherConfig,
}

impl RecoveryMatcher {
    pub fn new(config: RecoveryMatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecoveryMatcherConfig {
        &self.config
    }

    /// 为余料厚度匹配回收产品
    ///
    /// 余料非正、非有限值或规则为空时返回 None
    pub fn match_remainder(
        &self,
        remainder_cm: f64,
        rules: &[RecoveryRule],
    ) -> Option<RecoveryMatch> {
        self.match_with_stage(remainder_cm, rules)
            .map(|(_, matched)| matched)
    }

    /// 同 `match_remainder`，额外返回命中阶段
    #[instrument(skip(self, rules), fields(count = rules.len()))]
    pub fn match_with_stage(
        &self,
        remainder_cm: f64,
        rules: &[RecoveryRule],
    ) -> Option<(MatchStage, RecoveryMatch)> {
        if !remainder_cm.is_finite() || remainder_cm <= 0.0 || rules.is_empty() {
            debug!("余料或规则无效，跳过匹配");
            return None;
        }

        // 非正厚度规则不参与匹配（避免除零）
        let usable: Vec<&RecoveryRule> = rules.iter().filter(|r| r.is_valid()).collect();

        // 1) 精确匹配
        if let Some(rule) = usable.iter().find(|r| r.thickness_cm == remainder_cm) {
            debug!(thickness_cm = rule.thickness_cm, "精确匹配");
            return Some((MatchStage::Exact, RecoveryMatch::single((*rule).clone())));
        }

        // 2) 近似匹配：目录顺序中第一个落在容差内的规则
        if let Some(rule) = usable
            .iter()
            .find(|r| (r.thickness_cm - remainder_cm).abs() <= self.config.close_tolerance_cm)
        {
            debug!(thickness_cm = rule.thickness_cm, "近似匹配");
            return Some((MatchStage::Close, RecoveryMatch::single((*rule).clone())));
        }

        // 按厚度降序（稳定排序，同厚度保持目录顺序）
        let mut by_thickness = usable;
        by_thickness.sort_by(|a, b| b.thickness_cm.total_cmp(&a.thickness_cm));
        let fitting: Vec<&RecoveryRule> = by_thickness
            .into_iter()
            .filter(|r| r.thickness_cm <= remainder_cm)
            .collect();

        // 3) 精确组合
        for rule in &fitting {
            let (count, leftover_cm) = split(remainder_cm, rule.thickness_cm);
            if count >= 1 && leftover_cm < self.config.combination_leftover_limit_cm {
                debug!(
                    thickness_cm = rule.thickness_cm,
                    count, leftover_cm, "精确组合"
                );
                return Some((
                    MatchStage::ExactCombination,
                    RecoveryMatch::combination((*rule).clone(), count, leftover_cm),
                ));
            }
        }

        // 4) 兜底组合：最厚的可放入规则，余量不设上限
        // 注意: 与第 3 级的余量上限不对称，保持现有行为
        if let Some(rule) = fitting.first() {
            let (count, leftover_cm) = split(remainder_cm, rule.thickness_cm);
            debug!(
                thickness_cm = rule.thickness_cm,
                count, leftover_cm, "兜底组合"
            );
            return Some((
                MatchStage::FallbackCombination,
                RecoveryMatch::combination((*rule).clone(), count, leftover_cm),
            ));
        }

        // 5) 余料比所有规则都薄
        debug!(remainder_cm, "无标准回收方案");
        None
    }
}

/// 计算可切片数与剩余厚度: count = floor(remainder / thickness)
fn split(remainder_cm: f64, thickness_cm: f64) -> (u32, f64) {
    let count = (remainder_cm / thickness_cm).floor();
    let leftover_cm = (remainder_cm - count * thickness_cm).max(0.0);
    (count as u32, leftover_cm)
}
