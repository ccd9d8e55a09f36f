// crates/td_physics/src/sweep.rs

//! 扫描行上下文
//!
//! 方向分裂格式每次沿一个方向处理一行单元，另外两个逻辑索引固定。
//! 扫描方向和固定索引以显式参数传入计算核心，不依赖任何全局状态。

use ndarray::ArrayView2;
use td_foundation::Axis;

/// 原始变量中密度的默认列号
pub const RHO: usize = 0;

/// 扫描行索引：扫描方向 + 两个固定的横向逻辑索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SweepIndex {
    dir: Axis,
    fixed: [usize; 3],
}

impl SweepIndex {
    /// 创建扫描行索引
    ///
    /// `fixed[dir]` 被忽略。
    pub fn new(dir: Axis, fixed: [usize; 3]) -> Self {
        let mut fixed = fixed;
        fixed[dir.index()] = 0;
        Self { dir, fixed }
    }

    /// 扫描方向
    #[inline]
    pub fn dir(&self) -> Axis {
        self.dir
    }

    /// 某一方向的固定索引（扫描方向返回 0）
    #[inline]
    pub fn fixed(&self, axis: Axis) -> usize {
        self.fixed[axis.index()]
    }

    /// 两个横向固定索引（按轴顺序）
    #[inline]
    pub fn transverse_indices(&self) -> (usize, usize) {
        let [a, b] = self.dir.transverse();
        (self.fixed(a), self.fixed(b))
    }

    /// 行上第 `n` 个单元的三维索引 `[i, j, k]`
    #[inline]
    pub fn cell(&self, n: usize) -> [usize; 3] {
        let mut idx = self.fixed;
        idx[self.dir.index()] = n;
        idx
    }

    /// 将三维索引在 `axis` 方向偏移 `offset`
    #[inline]
    pub fn shifted(idx: [usize; 3], axis: Axis, offset: isize) -> [usize; 3] {
        let mut out = idx;
        let a = axis.index();
        out[a] = (idx[a] as isize + offset) as usize;
        out
    }
}

/// 单行原始变量上下文
///
/// `primitives` 形状为 `(row_len, n_vars)`，至少包含密度列。
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    primitives: ArrayView2<'a, f64>,
    rho_index: usize,
    sweep: SweepIndex,
}

impl<'a> RowContext<'a> {
    /// 创建行上下文（密度位于第 [`RHO`] 列）
    pub fn new(primitives: ArrayView2<'a, f64>, sweep: SweepIndex) -> Self {
        Self::with_rho_index(primitives, sweep, RHO)
    }

    /// 指定密度列号
    ///
    /// # Panics
    ///
    /// 密度列超出变量数时 panic。
    pub fn with_rho_index(primitives: ArrayView2<'a, f64>, sweep: SweepIndex, rho_index: usize) -> Self {
        assert!(
            rho_index < primitives.ncols(),
            "密度列 {} 超出原始变量数 {}",
            rho_index,
            primitives.ncols()
        );
        Self {
            primitives,
            rho_index,
            sweep,
        }
    }

    /// 行长度（含幽灵单元）
    #[inline]
    pub fn len(&self) -> usize {
        self.primitives.nrows()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primitives.nrows() == 0
    }

    /// 原始变量数
    #[inline]
    pub fn n_vars(&self) -> usize {
        self.primitives.ncols()
    }

    /// 第 `n` 个单元的密度
    #[inline]
    pub fn density(&self, n: usize) -> f64 {
        self.primitives[[n, self.rho_index]]
    }

    /// 原始变量视图
    #[inline]
    pub fn primitives(&self) -> ArrayView2<'a, f64> {
        self.primitives
    }

    /// 扫描行索引
    #[inline]
    pub fn sweep(&self) -> &SweepIndex {
        &self.sweep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_sweep_cell_index() {
        let sweep = SweepIndex::new(Axis::J, [3, 99, 5]);
        assert_eq!(sweep.fixed(Axis::J), 0);
        assert_eq!(sweep.cell(7), [3, 7, 5]);
        assert_eq!(sweep.transverse_indices(), (3, 5));
    }

    #[test]
    fn test_shifted() {
        let idx = [2, 2, 2];
        assert_eq!(SweepIndex::shifted(idx, Axis::K, 1), [2, 2, 3]);
        assert_eq!(SweepIndex::shifted(idx, Axis::I, -1), [1, 2, 2]);
    }

    #[test]
    fn test_row_density() {
        let mut prims = Array2::<f64>::zeros((4, 3));
        prims[[2, 0]] = 1.5;
        prims[[2, 1]] = 7.0;

        let sweep = SweepIndex::new(Axis::I, [0, 1, 1]);
        let row = RowContext::new(prims.view(), sweep);
        assert_eq!(row.len(), 4);
        assert_eq!(row.n_vars(), 3);
        assert_eq!(row.density(2), 1.5);

        let row = RowContext::with_rho_index(prims.view(), sweep, 1);
        assert_eq!(row.density(2), 7.0);
    }

    #[test]
    #[should_panic]
    fn test_row_invalid_rho_index() {
        let prims = Array2::<f64>::zeros((4, 1));
        let _ = RowContext::with_rho_index(prims.view(), SweepIndex::new(Axis::I, [0; 3]), 1);
    }
}
