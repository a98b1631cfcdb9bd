// ==========================================
// 车间管理系统 - KPI 录入会话
// ==========================================
// 职责:
// - 加载某工作日的工段配置 + 排班总览快照
// - 基于最新快照计算有效步骤与下一步（每次现算，不缓存）
// - 保存录入后刷新快照并前进到下一步
// 红线: 刷新失败时沿用上一份有效快照，直到重试成功
// ==========================================

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::entry::{DaySnapshot, KpiEntry};
use crate::domain::staffing::{NextStep, StepPosition, WorkItem};
use crate::engine::staffing_overview::StaffingOverview;
use crate::engine::step_sequencer::StepSequencer;
use crate::i18n;

// ==========================================
// StaffingService Trait
// ==========================================
// 实现者: 服务端录入/排班接口适配器
#[async_trait]
pub trait StaffingService: Send + Sync {
    /// 获取工作日的工段配置与排班总览
    async fn load_day(&self, work_date: NaiveDate) -> anyhow::Result<DaySnapshot>;

    /// 保存 KPI 录入，主键 (config_id, work_date, shift_id)
    async fn save_entry(&self, entry: &KpiEntry) -> anyhow::Result<()>;
}

/// 会话进度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "next", rename_all = "camelCase")]
pub enum Progress {
    /// 尚未成功加载任何数据
    NotLoaded,
    /// 已加载，但未打开任何步骤
    NoCurrentStep,
    /// 当前步骤之后的下一步（可能为 Finish）
    Next(NextStep),
}

// ==========================================
// KpiEntrySession
// ==========================================
pub struct KpiEntrySession {
    service: Arc<dyn StaffingService>,
    sequencer: StepSequencer,
    work_date: NaiveDate,
    snapshot: Option<DaySnapshot>,
    current: Option<StepPosition>,
}

impl KpiEntrySession {
    pub fn new(
        service: Arc<dyn StaffingService>,
        sequencer: StepSequencer,
        work_date: NaiveDate,
    ) -> Self {
        Self {
            service,
            sequencer,
            work_date,
            snapshot: None,
            current: None,
        }
    }

    pub fn work_date(&self) -> NaiveDate {
        self.work_date
    }

    pub fn snapshot(&self) -> Option<&DaySnapshot> {
        self.snapshot.as_ref()
    }

    pub fn current(&self) -> Option<&StepPosition> {
        self.current.as_ref()
    }

    /// 重新加载快照
    ///
    /// 失败时保留上一份快照并返回可重试错误
    #[instrument(skip(self), fields(work_date = %self.work_date))]
    pub async fn reload(&mut self) -> ApiResult<()> {
        match self.service.load_day(self.work_date).await {
            Ok(snapshot) => {
                info!(
                    configs = snapshot.configs.len(),
                    rows = snapshot.staffing.len(),
                    "排班快照已刷新"
                );
                self.snapshot = Some(snapshot);
                Ok(())
            }
            Err(e) => {
                warn!(
                    error = %e,
                    has_previous = self.snapshot.is_some(),
                    "排班快照刷新失败，沿用上一份快照"
                );
                Err(ApiError::collaborator("staffing", &e))
            }
        }
    }

    /// 切换工作日并加载（上一日的快照与当前步骤一并清空）
    pub async fn switch_date(&mut self, work_date: NaiveDate) -> ApiResult<()> {
        self.work_date = work_date;
        self.snapshot = None;
        self.current = None;
        self.reload().await
    }

    /// 打开指定步骤（允许 0 人的组合）
    pub fn open(&mut self, position: StepPosition) -> ApiResult<WorkItem> {
        let snapshot = self.loaded_snapshot()?;
        if snapshot.config(position.config_id).is_none() {
            return Err(ApiError::NotFound(format!(
                "工段配置(config_id={})不存在",
                position.config_id
            )));
        }

        let steps =
            self.sequencer
                .build_valid_steps(&snapshot.configs, &snapshot.staffing, Some(&position));
        let item = steps
            .into_iter()
            .find(|s| s.is_at(&position))
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "班次({})不在班次表中",
                    position.shift_id
                ))
            })?;

        self.current = Some(position);
        Ok(item)
    }

    /// 打开第一个有人的步骤；无可录入步骤时返回 None
    pub fn open_first(&mut self) -> ApiResult<Option<WorkItem>> {
        let snapshot = self.loaded_snapshot()?;
        let first = self
            .sequencer
            .build_valid_steps(&snapshot.configs, &snapshot.staffing, None)
            .into_iter()
            .next();

        self.current = first.as_ref().map(WorkItem::position);
        Ok(first)
    }

    /// 基于最新快照的有效步骤（未加载时为空）
    pub fn valid_steps(&self) -> Vec<WorkItem> {
        match &self.snapshot {
            Some(snapshot) => self.sequencer.build_valid_steps(
                &snapshot.configs,
                &snapshot.staffing,
                self.current.as_ref(),
            ),
            None => Vec::new(),
        }
    }

    /// 当前进度
    pub fn progress(&self) -> Progress {
        if self.snapshot.is_none() {
            return Progress::NotLoaded;
        }
        match &self.current {
            Some(current) => Progress::Next(self.sequencer.next(&self.valid_steps(), current)),
            None => Progress::NoCurrentStep,
        }
    }

    /// 排班总览（未加载时为 None）
    pub fn overview(&self) -> Option<StaffingOverview> {
        self.snapshot.as_ref().map(StaffingOverview::from_snapshot)
    }

    /// 保存当前步骤的录入并前进
    ///
    /// 保存成功后刷新快照；刷新失败时基于上一份快照前进
    #[instrument(skip(self, entry), fields(config_id = entry.config_id, shift = %entry.shift_id))]
    pub async fn submit_and_advance(&mut self, entry: KpiEntry) -> ApiResult<NextStep> {
        self.loaded_snapshot()?;
        let current = self
            .current
            .ok_or_else(|| ApiError::invalid_input("current", "未打开任何步骤"))?;

        if entry.position() != current {
            return Err(ApiError::invalid_input(
                "entry",
                format!(
                    "录入步骤 ({}, {}) 与当前步骤 ({}, {}) 不一致",
                    entry.config_id, entry.shift_id, current.config_id, current.shift_id
                ),
            ));
        }
        if entry.work_date != self.work_date {
            return Err(ApiError::invalid_input(
                "workDate",
                format!("录入日期 {} 与会话日期 {} 不一致", entry.work_date, self.work_date),
            ));
        }

        self.service.save_entry(&entry).await.map_err(|e| {
            warn!(error = %e, "KPI 录入保存失败");
            ApiError::collaborator("entries", &e)
        })?;
        info!("KPI 录入已保存");

        if self.reload().await.is_err() {
            warn!("保存后刷新失败，基于上一份快照计算下一步");
        }

        let next = self.sequencer.next(&self.valid_steps(), &current);
        self.current = next.item().map(WorkItem::position);
        Ok(next)
    }

    fn loaded_snapshot(&self) -> ApiResult<&DaySnapshot> {
        self.snapshot
            .as_ref()
            .ok_or_else(|| ApiError::NotLoaded(format!("work_date={}", self.work_date)))
    }
}

/// 生成进度提示文本
pub fn describe_progress(progress: &Progress) -> String {
    match progress {
        Progress::NotLoaded => i18n::t("step.not_loaded"),
        Progress::NoCurrentStep => i18n::t("step.no_current"),
        Progress::Next(NextStep::Finish) => i18n::t("step.finish"),
        Progress::Next(NextStep::Shift(item)) => i18n::t_with_args(
            "step.shift",
            &[
                ("shift", item.shift_label.as_str()),
                ("sector", item.sector_name.as_str()),
            ],
        ),
        Progress::Next(NextStep::Sector(item)) => i18n::t_with_args(
            "step.sector",
            &[
                ("sector", item.sector_name.as_str()),
                ("shift", item.shift_label.as_str()),
            ],
        ),
    }
}
