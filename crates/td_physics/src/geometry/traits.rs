//! 坐标度量 trait 定义
//!
//! 正交坐标系下，逻辑坐标导数通过 Lamé 尺度因子转换为物理线元导数：
//!
//! ```text
//! ∂C/∂l_a = (1 / h_a) · ∂C/∂x_a
//! ```
//!
//! 每种几何只需给出各方向的 `h_a`，梯度算子不再包含几何分支。

use std::fmt::Debug;

use td_config::GeometryKind;
use td_foundation::Axis;

use crate::mesh::FacePosition;

/// 坐标度量策略
pub trait CoordinateMetric: Debug + Send + Sync {
    /// 几何类型
    fn kind(&self) -> GeometryKind;

    /// `axis` 方向在界面位置 `face` 处的尺度因子 h
    fn scale_factor(&self, axis: Axis, face: &FacePosition) -> f64;

    /// `axis` 方向的尺度因子是否恒为 1
    ///
    /// 热路径据此跳过除法与奇点检查。
    fn is_unit(&self, axis: Axis) -> bool;
}
