// apps/td_cli/src/commands/validate.rs

//! 配置验证命令
//!
//! 解析并验证配置文件，报告错误与可能导致运行失败的警告。

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use td_config::{FluxLaw, GeometryKind, SingularityPolicy, TracerConfig};

/// 顶层已知字段
const KNOWN_KEYS: &[&str] = &[
    "geometry",
    "dimensions",
    "n_tracer",
    "run",
    "flux_law",
    "singularity",
    "mesh",
    "parallel",
];

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== TraceDiff 配置验证 ===");

    let mut result = ValidationResult::default();
    validate_config(&args.config, &mut result)?;

    print_validation_result(&result, args.strict)
}

fn validate_config(path: &Path, result: &mut ValidationResult) -> Result<()> {
    println!("\n检查配置文件: {}", path.display());

    if !path.exists() {
        result.add_error(format!("配置文件不存在: {}", path.display()));
        return Ok(());
    }

    let content = std::fs::read_to_string(path).context("无法读取配置文件")?;

    let json: serde_json::Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            result.add_error(format!("JSON 解析错误: {}", e));
            return Ok(());
        }
    };

    // 未识别的字段会被静默忽略，提示一下
    if let Some(obj) = json.as_object() {
        for key in obj.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
            result.add_warning(format!("未识别的字段: {}", key));
        }
    }

    let config: TracerConfig = match serde_json::from_value(json) {
        Ok(c) => c,
        Err(e) => {
            result.add_error(format!("配置结构错误: {}", e));
            return Ok(());
        }
    };

    if let Err(e) = config.validate() {
        result.add_error(e.to_string());
        return Ok(());
    }

    check_warnings(&config, result);
    println!("  ✓ 配置文件格式有效");

    Ok(())
}

fn check_warnings(config: &TracerConfig, result: &mut ValidationResult) {
    let mesh = &config.mesh;
    let rejects = config.singularity == SingularityPolicy::Reject;

    // 网格触及坐标奇点时，默认策略会在运行时报错
    if config.geometry.has_coordinate_singularity() && rejects {
        let h = (mesh.upper[0] - mesh.lower[0]) / mesh.cells[0].max(1) as f64;
        if mesh.lower[0] - (mesh.ghost as f64 - 1.0) * h <= 0.0 {
            result.add_warning(format!(
                "径向模板延伸到 r <= 0 (lower[0]={}), 奇点策略为 reject 时运行会失败",
                mesh.lower[0]
            ));
        }
    }

    if config.geometry == GeometryKind::Spherical && config.dimensions >= 2 && rejects {
        let h = (mesh.upper[1] - mesh.lower[1]) / mesh.cells[1].max(1) as f64;
        let reach = (mesh.ghost as f64 - 1.0) * h;
        if mesh.lower[1] - reach <= 0.0 || mesh.upper[1] + reach >= std::f64::consts::PI {
            result.add_warning("极角模板延伸到 θ = 0 或 π, 奇点策略为 reject 时运行会失败");
        }
    }

    // 非 reject 策略下，落在极点上的界面会被静默截断或置零
    if config.geometry == GeometryKind::Spherical && !rejects {
        let on_pole = mesh.lower[1] <= 0.0 || mesh.upper[1] >= std::f64::consts::PI;
        if on_pole {
            result.add_warning(format!(
                "极角范围 [{}, {}] 触及极点, 该处 r·sinθ 分量将按 {:?} 处理",
                mesh.lower[1], mesh.upper[1], config.singularity
            ));
        }
    }

    if config.run.reynolds < 1.0 {
        result.add_warning(format!(
            "REYNOLDS = {} 小于 1, 扩散系数 χ = {:.3e} 偏大",
            config.run.reynolds,
            config.run.diffusivity()
        ));
    }

    if let FluxLaw::Saturated { q_sat } = config.flux_law {
        if q_sat > 1e6 {
            result.add_warning(format!("q_sat = {} 很大, 饱和通量定律退化为线性", q_sat));
        }
    }

    for axis in 0..config.dimensions {
        if mesh.cells[axis] < 2 {
            result.add_warning(format!("mesh.cells[{}] = {} 过少", axis, mesh.cells[axis]));
        }
    }

    if config.parallel.enabled && config.parallel.min_rows == 0 {
        result.add_warning("parallel.min_rows = 0, 任意小的网格都会启用并行");
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    let success = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}
