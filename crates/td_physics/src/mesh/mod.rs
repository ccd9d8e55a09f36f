//! crates/td_physics/src/mesh/mod.rs
//! 网格元数据层
//!
//! 结构化网格的单元宽度、坐标与界面位置。

pub mod structured;

pub use structured::{AxisGrid, FacePosition, GridMetadata};
