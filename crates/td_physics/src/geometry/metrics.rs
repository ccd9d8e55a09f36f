//! 四种正交坐标系的尺度因子
//!
//! | 几何 | h1 | h2 | h3 |
//! |------|----|----|----|
//! | Cartesian | 1 | 1 | 1 |
//! | Cylindrical (r, z) | 1 | 1 | - |
//! | Polar (r, φ, z) | 1 | r | 1 |
//! | Spherical (r, θ, φ) | 1 | r | r·sinθ |

use td_config::GeometryKind;
use td_foundation::Axis;

use super::traits::CoordinateMetric;
use crate::mesh::FacePosition;

/// 笛卡尔坐标
#[derive(Debug, Clone, Copy, Default)]
pub struct Cartesian;

impl CoordinateMetric for Cartesian {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Cartesian
    }

    #[inline]
    fn scale_factor(&self, _axis: Axis, _face: &FacePosition) -> f64 {
        1.0
    }

    #[inline]
    fn is_unit(&self, _axis: Axis) -> bool {
        true
    }
}

/// 轴对称柱坐标 (r, z)
#[derive(Debug, Clone, Copy, Default)]
pub struct Cylindrical;

impl CoordinateMetric for Cylindrical {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Cylindrical
    }

    #[inline]
    fn scale_factor(&self, _axis: Axis, _face: &FacePosition) -> f64 {
        1.0
    }

    #[inline]
    fn is_unit(&self, _axis: Axis) -> bool {
        true
    }
}

/// 极坐标 (r, φ, z)
#[derive(Debug, Clone, Copy, Default)]
pub struct Polar;

impl CoordinateMetric for Polar {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Polar
    }

    #[inline]
    fn scale_factor(&self, axis: Axis, face: &FacePosition) -> f64 {
        match axis {
            Axis::J => face.radius(),
            Axis::I | Axis::K => 1.0,
        }
    }

    #[inline]
    fn is_unit(&self, axis: Axis) -> bool {
        axis != Axis::J
    }
}

/// 球坐标 (r, θ, φ)
#[derive(Debug, Clone, Copy, Default)]
pub struct Spherical;

impl CoordinateMetric for Spherical {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Spherical
    }

    #[inline]
    fn scale_factor(&self, axis: Axis, face: &FacePosition) -> f64 {
        match axis {
            Axis::I => 1.0,
            Axis::J => face.radius(),
            Axis::K => face.radius() * face.polar_angle().sin(),
        }
    }

    #[inline]
    fn is_unit(&self, axis: Axis) -> bool {
        axis == Axis::I
    }
}
