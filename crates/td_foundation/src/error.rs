// crates/td_foundation/src/error.rs

//! 基础层错误类型
//!
//! 只覆盖网格构造、维度解析和索引检查中出现的失败；
//! 坐标奇点、示踪剂数量等物理相关错误由 `td_physics::PhysicsError` 定义。
//!
//! ```
//! use td_foundation::error::{TdError, TdResult};
//!
//! fn check_cells(n: usize) -> TdResult<()> {
//!     td_foundation::ensure!(n > 0, TdError::invalid_mesh("单元数必须为正"));
//!     Ok(())
//! }
//!
//! assert!(check_cells(0).is_err());
//! ```

use thiserror::Error;

/// 基础层结果类型
pub type TdResult<T> = Result<T, TdError>;

/// 基础层错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TdError {
    /// 调用方传入的数据不合法（形状、数量等）
    #[error("无效的输入数据: {message}")]
    InvalidInput {
        /// 说明无效原因
        message: String,
    },

    /// 标量超出允许区间，例如维度不在 [1, 3]
    #[error("数据超出范围: {field}={value}, 期望范围=[{min}, {max}]")]
    OutOfRange {
        /// 字段名
        field: &'static str,
        /// 实际值
        value: f64,
        /// 最小允许值
        min: f64,
        /// 最大允许值
        max: f64,
    },

    /// 索引越界，例如密度列号超出原始变量数
    #[error("索引越界: {index_type} 索引 {index} 超出范围 0..{len}")]
    IndexOutOfBounds {
        /// 索引类别描述
        index_type: &'static str,
        /// 访问的索引
        index: usize,
        /// 上界（长度）
        len: usize,
    },

    /// 网格坐标或幽灵层设置不合法
    #[error("无效的网格: {message}")]
    InvalidMesh {
        /// 具体错误信息
        message: String,
    },

    /// 内部状态不一致（缓存窗口缺失等）
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

impl TdError {
    /// 无效输入
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// 超出范围
    pub fn out_of_range(field: &'static str, value: f64, min: f64, max: f64) -> Self {
        Self::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// 索引越界
    pub fn index_out_of_bounds(index_type: &'static str, index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds {
            index_type,
            index,
            len,
        }
    }

    /// 无效网格
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::InvalidMesh {
            message: message.into(),
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// `value` 不在 `[min, max]` 内（含 NaN）时返回 `OutOfRange`
    #[inline]
    pub fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> TdResult<()> {
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(Self::out_of_range(field, value, min, max))
        }
    }

    /// `index >= len` 时返回 `IndexOutOfBounds`
    #[inline]
    pub fn check_index(index_type: &'static str, index: usize, len: usize) -> TdResult<()> {
        if index < len {
            Ok(())
        } else {
            Err(Self::index_out_of_bounds(index_type, index, len))
        }
    }
}

/// 检查条件，不满足则提前返回错误
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err.into());
        }
    };
}
