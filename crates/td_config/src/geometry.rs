// crates/td_config/src/geometry.rs

//! 坐标系几何类型
//!
//! 提供 `GeometryKind` 枚举，在配置加载时选择一次，
//! 由物理层转换为对应的度量策略对象。

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 正交坐标系类型
///
/// # 线元
///
/// | 几何 | (dl1, dl2, dl3) |
/// |------|-----------------|
/// | Cartesian | (dx, dy, dz) |
/// | Cylindrical | (dr, dz, -) |
/// | Polar | (dr, r·dφ, dz) |
/// | Spherical | (dr, r·dθ, r·sinθ·dφ) |
///
/// # 示例
///
/// ```rust
/// use td_config::GeometryKind;
///
/// let geometry: GeometryKind = "spherical".parse().unwrap();
/// assert_eq!(geometry.max_dimensions(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    /// 笛卡尔坐标 (x, y, z)
    #[default]
    Cartesian,
    /// 轴对称柱坐标 (r, z)
    Cylindrical,
    /// 极坐标 (r, φ, z)
    Polar,
    /// 球坐标 (r, θ, φ)
    Spherical,
}

impl GeometryKind {
    /// 获取几何名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cartesian => "cartesian",
            Self::Cylindrical => "cylindrical",
            Self::Polar => "polar",
            Self::Spherical => "spherical",
        }
    }

    /// 支持的最大空间维数
    ///
    /// 轴对称柱坐标只定义 (r, z) 两个方向。
    pub fn max_dimensions(&self) -> usize {
        match self {
            Self::Cylindrical => 2,
            _ => 3,
        }
    }

    /// 是否含有坐标奇点（r → 0 或 sinθ → 0）
    #[inline]
    pub fn has_coordinate_singularity(&self) -> bool {
        matches!(self, Self::Polar | Self::Spherical)
    }

    /// 线元描述（用于日志）
    pub fn line_elements(&self) -> &'static str {
        match self {
            Self::Cartesian => "(dx, dy, dz)",
            Self::Cylindrical => "(dr, dz, -)",
            Self::Polar => "(dr, r*dphi, dz)",
            Self::Spherical => "(dr, r*dtheta, r*sin(theta)*dphi)",
        }
    }
}

impl std::fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 几何类型解析错误
#[derive(Debug, Clone)]
pub struct GeometryParseError(String);

impl FromStr for GeometryKind {
    type Err = GeometryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cartesian" | "xyz" => Ok(Self::Cartesian),
            "cylindrical" | "cyl" => Ok(Self::Cylindrical),
            "polar" => Ok(Self::Polar),
            "spherical" | "sph" => Ok(Self::Spherical),
            _ => Err(GeometryParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for GeometryParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "无效的几何类型: '{}', 期望 cartesian/cylindrical/polar/spherical",
            self.0
        )
    }
}

impl std::error::Error for GeometryParseError {}
