// crates/td_foundation/src/lib.rs

//! TraceDiff Foundation Layer
//!
//! 基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`dimension`]: 坐标轴与活动轴集合
//! - [`error`]: 统一错误类型
//! - [`tolerance`]: 数值容差
//!
//! # 设计原则
//!
//! 1. **最少依赖**: 仅依赖 serde 和 thiserror
//! 2. **类型安全**: 方向使用枚举而非裸整数
//! 3. **无全局状态**: 容差以参数形式注入

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dimension;
pub mod error;
pub mod tolerance;

// 重导出常用类型
pub use dimension::{ActiveAxes, Axis};
pub use error::{TdError, TdResult};
pub use tolerance::NumericalTolerance;

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::dimension::{ActiveAxes, Axis};
    pub use crate::ensure;
    pub use crate::error::{TdError, TdResult};
    pub use crate::tolerance::NumericalTolerance;
}
