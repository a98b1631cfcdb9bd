// ==========================================
// 车间管理系统 - 命令行入口
// ==========================================
// 子命令:
// - recovery: 为余料厚度给出回收建议
// - steps:    根据排班快照列出录入步骤与下一步
// ==========================================

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use factory_floor_planner::api::{describe, describe_progress, Progress};
use factory_floor_planner::catalog::{self, InMemoryRecoveryCatalog, RecoveryCatalog};
use factory_floor_planner::config::{LogFormat, PlannerConfig};
use factory_floor_planner::domain::{DaySnapshot, MaterialCategory, ShiftId, StepPosition};
use factory_floor_planner::engine::{RecoveryMatcher, StaffingOverview, StepSequencer};
use factory_floor_planner::{i18n, logging};

/// 车间管理系统 - 切块规划与 KPI 录入步骤
#[derive(Parser, Debug)]
#[command(name = "factory-floor-planner")]
#[command(version, about, long_about = None)]
struct Cli {
    /// 配置文件路径（默认: $FLOOR_PLANNER_CONFIG 或用户配置目录）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 为每块余料厚度匹配回收产品
    Recovery {
        /// 余料厚度（cm）
        #[arg(long)]
        remainder: f64,

        /// 物料大类（foam / memory / latex / ...）
        #[arg(long)]
        category: MaterialCategory,

        /// 物料ID
        #[arg(long)]
        material_id: i64,

        /// 回收规则 CSV（缺省时使用默认规则）
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// 列出有效录入步骤并计算下一步
    Steps {
        /// 排班快照 JSON（{"configs": [...], "staffing": [...]}）
        #[arg(long)]
        snapshot: PathBuf,

        /// 当前工段配置ID
        #[arg(long)]
        config_id: i64,

        /// 当前班次（morning / afternoon / night / custom）
        #[arg(long)]
        shift: ShiftId,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = PlannerConfig::load_or_default(cli.config.as_deref())?;
    let log_format = if cli.json_logs {
        LogFormat::Json
    } else {
        config.log_format
    };
    logging::init_with_format(log_format);
    i18n::set_locale(&config.locale);

    tracing::debug!(version = factory_floor_planner::VERSION, "启动");

    match cli.command {
        Command::Recovery {
            remainder,
            category,
            material_id,
            catalog: catalog_path,
        } => run_recovery(&config, remainder, category, material_id, catalog_path).await,
        Command::Steps {
            snapshot,
            config_id,
            shift,
        } => run_steps(&snapshot, StepPosition::new(config_id, shift)),
    }
}

async fn run_recovery(
    config: &PlannerConfig,
    remainder: f64,
    category: MaterialCategory,
    material_id: i64,
    catalog_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let store = InMemoryRecoveryCatalog::new();
    if let Some(path) = catalog_path {
        catalog::load_into(&store, &path)
            .with_context(|| format!("导入回收规则失败: {}", path.display()))?;
    }

    let seeded = store.seed_defaults(&category, material_id).await?;
    if seeded > 0 {
        tracing::info!(seeded, "目录无规则，已使用默认规则");
    }

    let rules = store.list_rules(&category, material_id).await?;
    let matcher = RecoveryMatcher::new(config.recovery.clone());
    let matched = matcher.match_with_stage(remainder, &rules);

    match &matched {
        Some((stage, m)) => {
            println!("{}", describe(Some(m)));
            println!("[{}] {}", stage, serde_json::to_string(m)?);
        }
        None => println!("{}", describe(None)),
    }
    Ok(())
}

fn run_steps(snapshot_path: &Path, current: StepPosition) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(snapshot_path)
        .with_context(|| format!("读取快照失败: {}", snapshot_path.display()))?;
    let snapshot: DaySnapshot = serde_json::from_str(&raw).context("快照解析失败")?;

    let sequencer = StepSequencer::default();
    let steps = sequencer.build_valid_steps(&snapshot.configs, &snapshot.staffing, Some(&current));

    for (idx, step) in steps.iter().enumerate() {
        let marker = if step.is_at(&current) { ">" } else { " " };
        println!(
            "{} {:>2}. {} / {}",
            marker,
            idx + 1,
            step.sector_name,
            step.shift_label
        );
    }

    let overview = StaffingOverview::from_snapshot(&snapshot);
    println!(
        "staffed={} day_complete={}",
        overview.staffed_shifts(),
        overview.is_day_complete()
    );

    let next = sequencer.next(&steps, &current);
    println!("{}", describe_progress(&Progress::Next(next)));
    Ok(())
}
