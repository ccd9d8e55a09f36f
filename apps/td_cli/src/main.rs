// apps/td_cli/src/main.rs

//! TraceDiff 命令行界面
//!
//! 在均匀结构网格上运行示踪剂扩散通量扫描、查看配置、验证配置文件。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 5: Application**：
//! - 只通过 `TracerConfig` 与 `DirectionalSweep` 访问计算核心
//! - 库内 `log` 记录由 tracing 订阅器统一输出

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;

/// TraceDiff 示踪剂扩散通量命令行工具
#[derive(Parser)]
#[command(name = "td_cli")]
#[command(author = "TraceDiff Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "TraceDiff tracer diffusive flux kernel", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行方向扫描
    Run(commands::run::RunArgs),
    /// 显示信息
    Info(commands::info::InfoArgs),
    /// 验证配置
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // try_init 同时安装 log -> tracing 桥接
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("初始化日志失败: {}", e))?;

    // 执行命令
    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
