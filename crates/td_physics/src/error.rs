// crates/td_physics/src/error.rs

//! 物理层错误类型
//!
//! 只包含可恢复的配置/数据错误。索引窗口越界属于调用方违约，
//! 直接 panic，不在此处建模。

use td_config::{ConfigError, GeometryKind};
use td_foundation::{Axis, TdError};
use thiserror::Error;

/// 物理层结果类型
pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// 物理层错误
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// 坐标奇点（度量尺度因子为零或非有限）
    #[error("坐标奇点: {geometry} 几何 {axis} 方向尺度因子 h={scale:e} (行索引 {index})")]
    CoordinateSingularity {
        /// 几何类型
        geometry: GeometryKind,
        /// 梯度分量所在轴
        axis: Axis,
        /// 界面索引
        index: usize,
        /// 尺度因子值
        scale: f64,
    },

    /// 示踪剂数量不匹配
    #[error("示踪剂数量不匹配: 期望 {expected}, 实际 {actual}")]
    SpeciesMismatch {
        /// 配置的示踪剂数量
        expected: usize,
        /// 实际提供的场数量
        actual: usize,
    },

    /// 通量输出数组形状不足
    #[error("通量输出形状 {actual:?} 不足, 至少需要 {required:?}")]
    OutputShape {
        /// 需要的最小形状 (界面数, 示踪剂数)
        required: (usize, usize),
        /// 实际形状
        actual: (usize, usize),
    },

    /// 扫描方向未激活
    #[error("扫描方向 {0} 不在活动轴集合中")]
    InactiveDirection(Axis),

    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 基础层错误
    #[error(transparent)]
    Foundation(#[from] TdError),
}
