// crates/td_foundation/src/tolerance.rs

//! 数值容差
//!
//! 计算核心中使用的容差阈值。通过参数注入使用，不存在全局可变状态。

/// 数值容差配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericalTolerance {
    /// 度量尺度因子 (r, r·sinθ) 的奇异阈值
    pub singular_scale: f64,
}

impl Default for NumericalTolerance {
    fn default() -> Self {
        Self {
            singular_scale: 1e-12,
        }
    }
}

impl NumericalTolerance {
    /// 尺度因子是否视为奇异
    #[inline]
    pub fn is_singular(&self, scale: f64) -> bool {
        !scale.is_finite() || scale.abs() < self.singular_scale
    }
}
