// crates/td_physics/src/lib.rs

//! TraceDiff Physics Layer (Layer 3)
//!
//! 结构网格上示踪剂扩散通量的计算核心：
//!
//! - 坐标几何 (geometry) - 四种正交坐标系的度量尺度因子
//! - 网格元数据 (mesh) - 单元中心、界面坐标、宽度及其倒数
//! - 场数据 (fields) - 基于 ndarray 的标量场与原始变量场
//! - 扫描上下文 (sweep) - 扫描方向、固定索引与单行原始变量
//! - 示踪剂通量 (tracer) - 梯度算子、通量组装、方向扫描驱动
//!
//! # 线程模型
//!
//! 算子本身只读，可在线程间共享；唯一的可变资源是 [`GradientCache`]，
//! 以 `&mut` 传入，因此每个工作线程必须持有自己的缓存。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod fields;
pub mod geometry;
pub mod mesh;
pub mod sweep;
pub mod tracer;

// 重导出常用类型
pub use error::{PhysicsError, PhysicsResult};
pub use fields::{FluxOutput, InterfaceFluxField, PrimitiveField, ScalarField};
pub use geometry::{create_metric, CoordinateMetric};
pub use mesh::{AxisGrid, FacePosition, GridMetadata};
pub use sweep::{RowContext, SweepIndex, RHO};
pub use tracer::{
    DirectionalSweep, FluxAssembler, GradientCache, GradientOperator, SweepOutput, SweepStats,
};
