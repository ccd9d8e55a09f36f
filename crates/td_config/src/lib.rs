// crates/td_config/src/lib.rs

//! TraceDiff Config Layer (Layer 2)
//!
//! 配置层，提供几何选择、运行参数和核心配置。
//! 本层完全无泛型，所有数值使用 f64。
//!
//! # 模块概览
//!
//! - [`geometry`]: GeometryKind 坐标系枚举
//! - [`run_params`]: RunParameters 运行参数与扩散系数
//! - [`tracer_config`]: TracerConfig 核心配置（JSON 读写与验证）
//! - [`error`]: 配置错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: td_cli        ─> uses TracerConfig
//! Layer 3: td_physics    ─> GradientOperator, FluxAssembler
//! Layer 2: td_config     ─> GeometryKind, RunParameters, TracerConfig (本层)
//! Layer 1: td_foundation
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod geometry;
pub mod run_params;
pub mod tracer_config;

// 重导出核心类型
pub use error::ConfigError;
pub use geometry::GeometryKind;
pub use run_params::RunParameters;
pub use tracer_config::{FluxLaw, MeshConfig, ParallelConfig, SingularityPolicy, TracerConfig};
