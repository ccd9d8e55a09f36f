// crates/td_physics/src/fields.rs

//! 场数据类型
//!
//! 所有场按逻辑单元索引 `[[i, j, k]]` 存储，包含幽灵单元。
//!
//! | 类型 | 形状 | 说明 |
//! |------|------|------|
//! | [`ScalarField`] | `(nx, ny, nz)` | 无量纲示踪剂浓度 |
//! | [`PrimitiveField`] | `(nx, ny, nz, n_vars)` | 原始变量，至少含密度 |
//! | [`FluxOutput`] | `(row_len, n_tracer)` | 单行界面通量 |
//! | [`InterfaceFluxField`] | `(nx, ny, nz, n_tracer)` | 整块界面通量，按左单元索引 |

use ndarray::{Array2, Array3, Array4, ArrayView2, Axis as NdAxis};
use td_foundation::Axis;

use crate::mesh::GridMetadata;
use crate::sweep::SweepIndex;

/// 标量场
pub type ScalarField = Array3<f64>;

/// 原始变量场
pub type PrimitiveField = Array4<f64>;

/// 单行通量输出 (界面索引 × 示踪剂)
pub type FluxOutput = Array2<f64>;

/// 整块界面通量 (i, j, k, 示踪剂)
pub type InterfaceFluxField = Array4<f64>;

/// 按单元中心坐标构造标量场
pub fn scalar_from_fn<F>(grid: &GridMetadata, f: F) -> ScalarField
where
    F: Fn([f64; 3]) -> f64,
{
    let [nx, ny, nz] = grid.shape();
    let (x, y, z) = (
        grid.axis(Axis::I).x(),
        grid.axis(Axis::J).x(),
        grid.axis(Axis::K).x(),
    );
    Array3::from_shape_fn((nx, ny, nz), |(i, j, k)| f([x[i], y[j], z[k]]))
}

/// 常数标量场
pub fn uniform_scalar(grid: &GridMetadata, value: f64) -> ScalarField {
    let [nx, ny, nz] = grid.shape();
    Array3::from_elem((nx, ny, nz), value)
}

/// 按单元中心坐标构造只含密度的原始变量场
pub fn density_from_fn<F>(grid: &GridMetadata, f: F) -> PrimitiveField
where
    F: Fn([f64; 3]) -> f64,
{
    scalar_from_fn(grid, f).insert_axis(NdAxis(3))
}

/// 扫描行的原始变量视图，形状 `(row_len, n_vars)`
pub fn primitive_row<'a>(primitives: &'a PrimitiveField, sweep: &SweepIndex) -> ArrayView2<'a, f64> {
    let view = primitives.view();
    match sweep.dir() {
        Axis::I => view
            .index_axis_move(NdAxis(2), sweep.fixed(Axis::K))
            .index_axis_move(NdAxis(1), sweep.fixed(Axis::J)),
        Axis::J => view
            .index_axis_move(NdAxis(2), sweep.fixed(Axis::K))
            .index_axis_move(NdAxis(0), sweep.fixed(Axis::I)),
        Axis::K => view
            .index_axis_move(NdAxis(1), sweep.fixed(Axis::J))
            .index_axis_move(NdAxis(0), sweep.fixed(Axis::I)),
    }
}
