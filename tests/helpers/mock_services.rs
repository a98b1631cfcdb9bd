// ==========================================
// 外部服务 Mock - 用于集成测试
// ==========================================

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::NaiveDate;
use factory_floor_planner::api::{BlockMathService, StaffingService};
use factory_floor_planner::domain::{BlockMathRequest, BlockMathResult, DaySnapshot, KpiEntry};

// ==========================================
// 切块计算 Mock：返回固定结果或错误
// ==========================================

pub struct FixedBlockMath {
    result: Option<BlockMathResult>,
    pub calls: Mutex<Vec<BlockMathRequest>>,
}

impl FixedBlockMath {
    pub fn returning(remainder_per_block_cm: f64) -> Self {
        Self {
            result: Some(BlockMathResult {
                blocks_needed: 3,
                sheets_per_block: 12,
                total_sheets: 36,
                extra_sheets: 1,
                remainder_per_block_cm,
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BlockMathService for FixedBlockMath {
    async fn compute(&self, request: &BlockMathRequest) -> anyhow::Result<BlockMathResult> {
        self.calls.lock().unwrap().push(request.clone());
        self.result
            .clone()
            .ok_or_else(|| anyhow!("block math service unavailable"))
    }
}

// ==========================================
// 排班/录入服务 Mock：按顺序返回预设的加载结果
// ==========================================

pub struct ScriptedStaffing {
    loads: Mutex<VecDeque<anyhow::Result<DaySnapshot>>>,
    fallback: Mutex<Option<DaySnapshot>>,
    fail_saves: bool,
    pub saved: Mutex<Vec<KpiEntry>>,
    pub loaded_dates: Mutex<Vec<NaiveDate>>,
}

impl ScriptedStaffing {
    /// 每次加载都返回同一快照
    pub fn always(snapshot: DaySnapshot) -> Self {
        Self {
            loads: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(Some(snapshot)),
            fail_saves: false,
            saved: Mutex::new(Vec::new()),
            loaded_dates: Mutex::new(Vec::new()),
        }
    }

    /// 按顺序返回脚本结果，用尽后返回错误
    pub fn scripted(loads: Vec<anyhow::Result<DaySnapshot>>) -> Self {
        Self {
            loads: Mutex::new(loads.into_iter().collect()),
            fallback: Mutex::new(None),
            fail_saves: false,
            saved: Mutex::new(Vec::new()),
            loaded_dates: Mutex::new(Vec::new()),
        }
    }

    pub fn with_failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn saved_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }
}

#[async_trait]
impl StaffingService for ScriptedStaffing {
    async fn load_day(&self, work_date: NaiveDate) -> anyhow::Result<DaySnapshot> {
        self.loaded_dates.lock().unwrap().push(work_date);
        if let Some(next) = self.loads.lock().unwrap().pop_front() {
            return next;
        }
        self.fallback
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| anyhow!("staffing service unavailable"))
    }

    async fn save_entry(&self, entry: &KpiEntry) -> anyhow::Result<()> {
        if self.fail_saves {
            return Err(anyhow!("validation failed"));
        }
        self.saved.lock().unwrap().push(entry.clone());
        Ok(())
    }
}
