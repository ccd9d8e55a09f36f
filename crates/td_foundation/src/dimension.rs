// crates/td_foundation/src/dimension.rs

//! 运行时维度系统
//!
//! 坐标轴 [`Axis`] 与活动轴集合 [`ActiveAxes`]。
//!
//! # 用法
//!
//! ```
//! use td_foundation::dimension::{ActiveAxes, Axis};
//!
//! let axes = ActiveAxes::from_dimensions(2).unwrap();
//! assert!(axes.contains(Axis::J));
//! assert!(!axes.contains(Axis::K));
//! assert_eq!(axes.iter().count(), 2);
//! ```
//!
//! # 设计说明
//!
//! 维度在配置加载时确定一次，之后以活动轴集合的形式传入计算核心，
//! 未激活的轴不参与梯度分量计算。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TdError, TdResult};

/// 逻辑坐标轴
///
/// 三个正交方向，对应 (x1, x2, x3)。具体物理含义由几何类型决定，
/// 例如球坐标下为 (r, θ, φ)。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// 第一方向 (x / r)
    I,
    /// 第二方向 (y / z / φ / θ)
    J,
    /// 第三方向 (z / φ)
    K,
}

impl Axis {
    /// 全部坐标轴（按顺序）
    pub const ALL: [Axis; 3] = [Axis::I, Axis::J, Axis::K];

    /// 轴序号 (0, 1, 2)
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::I => 0,
            Axis::J => 1,
            Axis::K => 2,
        }
    }

    /// 垂直于本轴的两个轴（按顺序）
    #[inline]
    pub const fn transverse(self) -> [Axis; 2] {
        match self {
            Axis::I => [Axis::J, Axis::K],
            Axis::J => [Axis::I, Axis::K],
            Axis::K => [Axis::I, Axis::J],
        }
    }

    /// 轴名称（用于日志）
    pub fn name(self) -> &'static str {
        match self {
            Axis::I => "i",
            Axis::J => "j",
            Axis::K => "k",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 活动轴集合
///
/// 由空间维数 (1/2/3) 构造，维数 n 对应前 n 个轴。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveAxes {
    mask: [bool; 3],
}

impl ActiveAxes {
    /// 三维全部激活
    pub const ALL: ActiveAxes = ActiveAxes { mask: [true; 3] };

    /// 由空间维数构造
    pub fn from_dimensions(dimensions: usize) -> TdResult<Self> {
        TdError::check_range("dimensions", dimensions as f64, 1.0, 3.0)?;
        let mut mask = [false; 3];
        mask.iter_mut().take(dimensions).for_each(|m| *m = true);
        Ok(Self { mask })
    }

    /// 由显式轴列表构造
    pub fn from_axes(axes: &[Axis]) -> Self {
        let mut mask = [false; 3];
        for axis in axes {
            mask[axis.index()] = true;
        }
        Self { mask }
    }

    /// 是否包含该轴
    #[inline]
    pub fn contains(&self, axis: Axis) -> bool {
        self.mask[axis.index()]
    }

    /// 活动轴数量
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// 遍历活动轴
    pub fn iter(&self) -> impl Iterator<Item = Axis> + '_ {
        Axis::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}
