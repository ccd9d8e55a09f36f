// apps/td_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示版本、解析后的配置和由配置导出的扩散系数。

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use td_config::TracerConfig;
use td_foundation::ActiveAxes;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 配置文件路径（缺省显示默认配置）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 显示系统信息
    #[arg(long)]
    pub system: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== TraceDiff 信息 ===");

    if args.system {
        print_system_info();
        println!();
    }

    let config = super::load_config(args.config.as_deref())?;
    print_config(&config)
}

fn print_system_info() {
    println!("=== 系统信息 ===");
    println!("TraceDiff CLI 版本: {}", env!("CARGO_PKG_VERSION"));
    println!("目标平台: {}", std::env::consts::ARCH);
    println!("操作系统: {}", std::env::consts::OS);
    println!("rayon 线程数: {}", rayon::current_num_threads());
}

fn print_config(config: &TracerConfig) -> Result<()> {
    println!("=== 配置 ===");
    println!("{}", serde_json::to_string_pretty(config)?);

    let run = &config.run;
    let axes = ActiveAxes::from_dimensions(config.dimensions)?;
    let names: Vec<&str> = axes.iter().map(|a| a.name()).collect();

    println!("\n=== 导出量 ===");
    println!("几何: {} ({})", config.geometry, config.geometry.line_elements());
    println!("活动方向: {}", names.join(", "));
    println!("归一化常数: UNIT_LENGTH={}, UNIT_VELOCITY={}", run.unit_length(), run.unit_velocity());
    println!("有量纲扩散系数 2·U·L/Re = {:.6e}", run.dimensional_diffusivity());
    println!("无量纲扩散系数 χ = {:.6e}", run.diffusivity());
    println!("通量定律: {:?}", config.flux_law);
    println!("奇点策略: {:?}", config.singularity);

    Ok(())
}
