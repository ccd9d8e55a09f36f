//! 结构化网格元数据
//!
//! 每个方向保存单元中心坐标、右界面坐标、单元宽度及其倒数，
//! 以及相邻单元中心间距的倒数。索引包含幽灵单元：
//!
//! ```text
//!  ghost |   interior cells   | ghost
//! [0 .. g)[g .......... g+n)[g+n .. n+2g)
//! ```
//!
//! 界面 `n` 指单元 `n` 与 `n+1` 之间的面（即 `xr[n]`）。

use td_config::MeshConfig;
use td_foundation::{ensure, Axis, TdError, TdResult};

use crate::sweep::SweepIndex;

/// 单方向网格数据
#[derive(Debug, Clone, PartialEq)]
pub struct AxisGrid {
    /// 单元中心坐标
    x: Vec<f64>,
    /// 右界面坐标
    xr: Vec<f64>,
    /// 单元宽度
    dx: Vec<f64>,
    /// 单元宽度倒数
    inv_dx: Vec<f64>,
    /// 相邻单元中心间距倒数 1/(x[n+1]-x[n])
    inv_dxi: Vec<f64>,
    /// 每侧幽灵单元数
    n_ghost: usize,
}

impl AxisGrid {
    /// 由界面坐标构造（含幽灵单元，共 `len + 1` 个界面）
    pub fn from_interfaces(interfaces: &[f64], n_ghost: usize) -> TdResult<Self> {
        ensure!(
            interfaces.len() >= 2,
            TdError::invalid_mesh("至少需要两个界面坐标")
        );
        let n = interfaces.len() - 1;
        ensure!(
            n > 2 * n_ghost,
            TdError::invalid_mesh(format!("{} 个单元不足以容纳 {} 层幽灵单元", n, n_ghost))
        );

        let mut x = Vec::with_capacity(n);
        let mut dx = Vec::with_capacity(n);
        for w in interfaces.windows(2) {
            let width = w[1] - w[0];
            ensure!(
                width.is_finite() && width > 0.0,
                TdError::invalid_mesh(format!("界面坐标必须严格递增: {} -> {}", w[0], w[1]))
            );
            x.push(0.5 * (w[0] + w[1]));
            dx.push(width);
        }

        let inv_dx: Vec<f64> = dx.iter().map(|w| 1.0 / w).collect();
        let mut inv_dxi: Vec<f64> = x.windows(2).map(|c| 1.0 / (c[1] - c[0])).collect();
        // 最后一个单元没有右邻居，用自身宽度补齐
        inv_dxi.push(inv_dx[n - 1]);

        Ok(Self {
            x,
            xr: interfaces[1..].to_vec(),
            dx,
            inv_dx,
            inv_dxi,
            n_ghost,
        })
    }

    /// 均匀网格：`n_cells` 个内部单元覆盖 `[lower, upper]`，两侧各 `n_ghost` 层
    pub fn uniform(n_cells: usize, n_ghost: usize, lower: f64, upper: f64) -> TdResult<Self> {
        ensure!(n_cells > 0, TdError::invalid_mesh("内部单元数必须为正"));
        ensure!(
            upper > lower,
            TdError::invalid_mesh(format!("上边界 {} 必须大于下边界 {}", upper, lower))
        );

        let h = (upper - lower) / n_cells as f64;
        let total = n_cells + 2 * n_ghost;
        let interfaces: Vec<f64> = (0..=total)
            .map(|n| lower + (n as f64 - n_ghost as f64) * h)
            .collect();
        Self::from_interfaces(&interfaces, n_ghost)
    }

    /// 退化方向：单个单元，无幽灵层
    ///
    /// 用于未激活的方向，中心坐标仍参与度量计算（例如 2D 球坐标下的 θ）。
    pub fn degenerate(center: f64, width: f64) -> TdResult<Self> {
        let half = 0.5 * width;
        Self::from_interfaces(&[center - half, center + half], 0)
    }

    /// 总单元数（含幽灵单元）
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// 是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// 每侧幽灵单元数
    #[inline]
    pub fn n_ghost(&self) -> usize {
        self.n_ghost
    }

    /// 内部单元数
    #[inline]
    pub fn n_interior(&self) -> usize {
        self.len() - 2 * self.n_ghost
    }

    /// 内部单元索引范围
    pub fn interior(&self) -> std::ops::Range<usize> {
        self.n_ghost..self.n_ghost + self.n_interior()
    }

    /// 单元中心坐标
    #[inline]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// 右界面坐标
    #[inline]
    pub fn xr(&self) -> &[f64] {
        &self.xr
    }

    /// 单元宽度
    #[inline]
    pub fn dx(&self) -> &[f64] {
        &self.dx
    }

    /// 单元宽度倒数
    #[inline]
    pub fn inv_dx(&self) -> &[f64] {
        &self.inv_dx
    }

    /// 相邻单元中心间距倒数
    #[inline]
    pub fn inv_dxi(&self) -> &[f64] {
        &self.inv_dxi
    }
}

/// 界面位置
///
/// 沿扫描方向取界面坐标，横向取单元中心坐标。
/// 度量因子（半径、极角）从这里读取。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePosition {
    /// 三个方向的坐标 (x1, x2, x3)
    pub coords: [f64; 3],
}

impl FacePosition {
    /// 从坐标创建
    #[inline]
    pub fn new(coords: [f64; 3]) -> Self {
        Self { coords }
    }

    /// 第一方向坐标（曲线坐标下为半径 r）
    #[inline]
    pub fn radius(&self) -> f64 {
        self.coords[0]
    }

    /// 第二方向坐标（球坐标下为极角 θ）
    #[inline]
    pub fn polar_angle(&self) -> f64 {
        self.coords[1]
    }
}

/// 三维结构化网格元数据
#[derive(Debug, Clone, PartialEq)]
pub struct GridMetadata {
    axes: [AxisGrid; 3],
}

impl GridMetadata {
    /// 由三个方向构造
    pub fn new(axes: [AxisGrid; 3]) -> Self {
        Self { axes }
    }

    /// 由网格配置构造
    ///
    /// 前 `dimensions` 个方向为均匀网格，其余方向退化为单个单元，
    /// 中心取 `(lower + upper) / 2`。
    pub fn from_mesh_config(mesh: &MeshConfig, dimensions: usize) -> TdResult<Self> {
        TdError::check_range("dimensions", dimensions as f64, 1.0, 3.0)?;

        let build = |axis: usize| -> TdResult<AxisGrid> {
            if axis < dimensions {
                AxisGrid::uniform(mesh.cells[axis], mesh.ghost, mesh.lower[axis], mesh.upper[axis])
            } else {
                let width = mesh.upper[axis] - mesh.lower[axis];
                let center = 0.5 * (mesh.lower[axis] + mesh.upper[axis]);
                AxisGrid::degenerate(center, if width > 0.0 { width } else { 1.0 })
            }
        };

        Ok(Self::new([build(0)?, build(1)?, build(2)?]))
    }

    /// 单方向网格
    #[inline]
    pub fn axis(&self, axis: Axis) -> &AxisGrid {
        &self.axes[axis.index()]
    }

    /// 各方向总单元数（含幽灵单元）
    pub fn shape(&self) -> [usize; 3] {
        [self.axes[0].len(), self.axes[1].len(), self.axes[2].len()]
    }

    /// 扫描行上界面 `n` 的位置
    #[inline]
    pub fn face_position(&self, sweep: &SweepIndex, n: usize) -> FacePosition {
        let mut coords = [0.0; 3];
        for axis in Axis::ALL {
            let grid = self.axis(axis);
            coords[axis.index()] = if axis == sweep.dir() {
                grid.xr[n]
            } else {
                grid.x[sweep.fixed(axis)]
            };
        }
        FacePosition::new(coords)
    }
}
