//! # 坐标几何模块
//!
//! 以策略对象表达几何相关的度量尺度因子：
//!
//! - `CoordinateMetric` - 度量 trait 定义
//! - `Cartesian` - 笛卡尔坐标
//! - `Cylindrical` - 轴对称柱坐标
//! - `Polar` - 极坐标
//! - `Spherical` - 球坐标
//!
//! ## 使用方式
//!
//! ```ignore
//! use td_physics::geometry::create_metric;
//!
//! let metric = create_metric(GeometryKind::Spherical);
//! let h3 = metric.scale_factor(Axis::K, &face); // r·sinθ
//! ```

mod metrics;
mod traits;

pub use metrics::{Cartesian, Cylindrical, Polar, Spherical};
pub use traits::CoordinateMetric;

use td_config::GeometryKind;

/// 根据配置创建度量策略
pub fn create_metric(kind: GeometryKind) -> Box<dyn CoordinateMetric> {
    match kind {
        GeometryKind::Cartesian => Box::new(Cartesian),
        GeometryKind::Cylindrical => Box::new(Cylindrical),
        GeometryKind::Polar => Box::new(Polar),
        GeometryKind::Spherical => Box::new(Spherical),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::FacePosition;
    use std::f64::consts::FRAC_PI_2;
    use td_foundation::Axis;

    fn face(r: f64, theta: f64) -> FacePosition {
        FacePosition::new([r, theta, 0.3])
    }

    #[test]
    fn test_create_metric_kind() {
        for kind in [
            GeometryKind::Cartesian,
            GeometryKind::Cylindrical,
            GeometryKind::Polar,
            GeometryKind::Spherical,
        ] {
            assert_eq!(create_metric(kind).kind(), kind);
        }
    }

    #[test]
    fn test_cartesian_unit() {
        let metric = create_metric(GeometryKind::Cartesian);
        for axis in Axis::ALL {
            assert!(metric.is_unit(axis));
            assert_eq!(metric.scale_factor(axis, &face(2.0, 1.0)), 1.0);
        }
    }

    #[test]
    fn test_polar_scale() {
        let metric = create_metric(GeometryKind::Polar);
        let f = face(2.5, 0.7);
        assert_eq!(metric.scale_factor(Axis::I, &f), 1.0);
        assert_eq!(metric.scale_factor(Axis::J, &f), 2.5);
        assert_eq!(metric.scale_factor(Axis::K, &f), 1.0);
        assert!(!metric.is_unit(Axis::J));
    }

    #[test]
    fn test_spherical_scale() {
        let metric = create_metric(GeometryKind::Spherical);
        let f = face(2.0, FRAC_PI_2);
        assert_eq!(metric.scale_factor(Axis::I, &f), 1.0);
        assert_eq!(metric.scale_factor(Axis::J, &f), 2.0);
        assert!((metric.scale_factor(Axis::K, &f) - 2.0).abs() < 1e-14);

        let f = face(2.0, FRAC_PI_2 / 3.0);
        assert!((metric.scale_factor(Axis::K, &f) - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_spherical_singular_axis() {
        let metric = create_metric(GeometryKind::Spherical);
        assert_eq!(metric.scale_factor(Axis::K, &face(1.0, 0.0)), 0.0);
        assert_eq!(metric.scale_factor(Axis::J, &face(0.0, 1.0)), 0.0);
    }
}
