// apps/td_cli/src/commands/run.rs

//! 运行扫描命令
//!
//! 在配置的均匀网格上构造示踪剂初始场（线性斜坡或高斯峰）与均匀密度，
//! 沿指定方向执行扩散通量扫描并输出统计。

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use td_config::{GeometryKind, TracerConfig};
use td_foundation::Axis;
use td_physics::fields::{density_from_fn, scalar_from_fn};
use td_physics::{DirectionalSweep, GridMetadata, ScalarField, SweepStats, RHO};

/// 扫描方向选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    /// 第一方向
    I,
    /// 第二方向
    J,
    /// 第三方向
    K,
    /// 全部活动方向
    All,
}

/// 初始示踪剂分布
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// 沿各活动方向的线性斜坡
    Ramp,
    /// 位于区域中心的高斯峰
    Gaussian,
}

/// 运行扫描参数
#[derive(Args)]
pub struct RunArgs {
    /// 配置文件路径（缺省使用默认配置）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 扫描方向
    #[arg(short, long, value_enum, default_value = "all")]
    pub direction: DirectionArg,

    /// 初始示踪剂分布
    #[arg(short, long, value_enum, default_value = "ramp")]
    pub profile: ProfileArg,

    /// 统计结果输出文件 (JSON)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// 单方向统计报告
#[derive(Debug, Serialize)]
struct SweepReport {
    dir: Axis,
    elapsed_ms: f64,
    #[serde(flatten)]
    stats: SweepStats,
}

/// 运行报告
#[derive(Debug, Serialize)]
struct RunReport {
    geometry: GeometryKind,
    dimensions: usize,
    n_tracer: usize,
    shape: [usize; 3],
    diffusivity: f64,
    sweeps: Vec<SweepReport>,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== TraceDiff 扩散通量扫描 ===");

    let config = super::load_config(args.config.as_deref())?;
    let sweep = DirectionalSweep::from_config(&config).context("构建扫描驱动失败")?;
    let grid = sweep.grid();

    info!(
        "几何: {} ({}), {} 维, {} 种示踪剂",
        config.geometry,
        config.geometry.line_elements(),
        config.dimensions,
        config.n_tracer
    );
    info!("网格形状 (含幽灵单元): {:?}", grid.shape());
    info!("扩散系数 χ = {:.6e}", sweep.assembler().diffusivity());

    let tracers = build_tracers(&config, grid, args.profile);
    let primitives = density_from_fn(grid, |_| 1.0);

    let dirs: Vec<Axis> = match args.direction {
        DirectionArg::I => vec![Axis::I],
        DirectionArg::J => vec![Axis::J],
        DirectionArg::K => vec![Axis::K],
        DirectionArg::All => sweep.assembler().operator().active_axes().iter().collect(),
    };

    let mut reports = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let start = Instant::now();
        let out = sweep
            .run(dir, &tracers, &primitives, RHO)
            .with_context(|| format!("{} 方向扫描失败", dir))?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        info!(
            "{} 方向: {} 行, {} 个界面, max|F|={:.6e}, ‖F‖₂={:.6e}, 耗时 {:.3} ms",
            dir,
            out.stats.n_rows,
            out.stats.n_interfaces,
            out.stats.max_abs,
            out.stats.l2,
            elapsed_ms
        );

        reports.push(SweepReport {
            dir,
            elapsed_ms,
            stats: out.stats,
        });
    }

    if let Some(path) = &args.output {
        let report = RunReport {
            geometry: config.geometry,
            dimensions: config.dimensions,
            n_tracer: config.n_tracer,
            shape: grid.shape(),
            diffusivity: sweep.assembler().diffusivity(),
            sweeps: reports,
        };
        let content = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, content)
            .with_context(|| format!("无法写入输出文件: {}", path.display()))?;
        info!("统计结果已写入 {}", path.display());
    }

    info!("=== 扫描完成 ===");
    Ok(())
}

/// 构造各示踪剂初始场，第 s 种示踪剂的幅值为 s + 1
fn build_tracers(config: &TracerConfig, grid: &GridMetadata, profile: ProfileArg) -> Vec<ScalarField> {
    let dims = config.dimensions;
    let mesh = &config.mesh;

    let center: Vec<f64> = (0..3).map(|a| 0.5 * (mesh.lower[a] + mesh.upper[a])).collect();
    let sigma: Vec<f64> = (0..3).map(|a| 0.15 * (mesh.upper[a] - mesh.lower[a])).collect();

    (0..config.n_tracer)
        .map(|s| {
            let amplitude = (s + 1) as f64;
            match profile {
                ProfileArg::Ramp => scalar_from_fn(grid, |x| {
                    amplitude * (0..dims).map(|a| x[a] - mesh.lower[a]).sum::<f64>()
                }),
                ProfileArg::Gaussian => scalar_from_fn(grid, |x| {
                    let r2: f64 = (0..dims)
                        .map(|a| ((x[a] - center[a]) / sigma[a]).powi(2))
                        .sum();
                    amplitude * (-0.5 * r2).exp()
                }),
            }
        })
        .collect()
}
