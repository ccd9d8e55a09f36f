// crates/td_physics/src/tracer/gradient.rs

//! 界面梯度算子
//!
//! 沿扫描方向，在界面 `n`（单元 `n` 与 `n+1` 之间）处计算示踪剂浓度的
//! 三分量物理梯度 (∂C/∂l1, ∂C/∂l2, ∂C/∂l3)。
//!
//! # 离散格式
//!
//! 沿扫描方向 d：
//!
//! ```text
//! ∂C/∂x_d = (C[n+1] - C[n]) · inv_dxi[n]
//! ```
//!
//! 横向方向 t（固定索引 m）取四点平均中心差分：
//!
//! ```text
//! ∂C/∂x_t = 0.25 · (C[n, m+1] + C[n+1, m+1] - C[n, m-1] - C[n+1, m-1]) · inv_dx_t[m]
//! ```
//!
//! 每个分量再乘以度量因子 `1/h`，`h` 为该方向的 Lamé 尺度因子，
//! 在界面位置处求值（见 [`GridMetadata::face_position`]）。

use td_config::{SingularityPolicy, TracerConfig};
use td_foundation::{ActiveAxes, Axis, NumericalTolerance};

use super::cache::{FaceGradient, GradientCache};
use crate::error::{PhysicsError, PhysicsResult};
use crate::fields::ScalarField;
use crate::geometry::{create_metric, CoordinateMetric};
use crate::mesh::GridMetadata;
use crate::sweep::SweepIndex;

/// 尺度因子的处理结果
#[derive(Debug, Clone, Copy, PartialEq)]
enum ScaleOutcome {
    /// 正常值
    Regular(f64),
    /// 被截断后的值
    Clamped(f64),
    /// 分量置零
    Zeroed,
}

/// 界面梯度算子
///
/// 持有几何度量策略、活动轴集合和奇点策略，本身无可变状态，
/// 可在多线程间共享；可变的梯度缓存由调用方以 `&mut` 传入。
#[derive(Debug)]
pub struct GradientOperator {
    metric: Box<dyn CoordinateMetric>,
    axes: ActiveAxes,
    policy: SingularityPolicy,
    tolerance: NumericalTolerance,
}

impl GradientOperator {
    /// 创建梯度算子（默认拒绝奇点）
    pub fn new(metric: Box<dyn CoordinateMetric>, axes: ActiveAxes) -> Self {
        Self {
            metric,
            axes,
            policy: SingularityPolicy::default(),
            tolerance: NumericalTolerance::default(),
        }
    }

    /// 从配置创建
    pub fn from_config(config: &TracerConfig) -> PhysicsResult<Self> {
        let axes = ActiveAxes::from_dimensions(config.dimensions)?;
        Ok(Self::new(create_metric(config.geometry), axes)
            .with_singularity_policy(config.singularity))
    }

    /// 设置奇点策略
    pub fn with_singularity_policy(mut self, policy: SingularityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// 度量策略
    #[inline]
    pub fn metric(&self) -> &dyn CoordinateMetric {
        self.metric.as_ref()
    }

    /// 活动轴集合
    #[inline]
    pub fn active_axes(&self) -> ActiveAxes {
        self.axes
    }

    /// 奇点策略
    #[inline]
    pub fn singularity_policy(&self) -> SingularityPolicy {
        self.policy
    }

    /// 计算 `[beg, end]` 内每个界面的梯度，写入 `out[beg..=end]`
    ///
    /// 窗口外的 `out` 元素保持不变；未激活方向的分量写为 0。
    ///
    /// # Errors
    ///
    /// - 扫描方向未激活时返回 [`PhysicsError::InactiveDirection`]
    /// - 策略为 `Reject` 且遇到奇异尺度因子时返回
    ///   [`PhysicsError::CoordinateSingularity`]
    ///
    /// # Panics
    ///
    /// 索引窗口越界、横向模板超出场范围或场形状与网格不符时 panic。
    pub fn compute(
        &self,
        field: &ScalarField,
        grid: &GridMetadata,
        sweep: &SweepIndex,
        beg: usize,
        end: usize,
        out: &mut [FaceGradient],
    ) -> PhysicsResult<()> {
        let dir = sweep.dir();
        if !self.axes.contains(dir) {
            return Err(PhysicsError::InactiveDirection(dir));
        }
        self.check_contract(field, grid, sweep, beg, end, out.len());

        let along = grid.axis(dir);
        let inv_dxi = along.inv_dxi();
        let mut adjusted = 0usize;

        for n in beg..=end {
            let left = sweep.cell(n);
            let right = sweep.cell(n + 1);
            let face = grid.face_position(sweep, n);
            let mut grad = [0.0; 3];

            for axis in self.axes.iter() {
                let raw = if axis == dir {
                    (field[right] - field[left]) * inv_dxi[n]
                } else {
                    let up = |idx| SweepIndex::shifted(idx, axis, 1);
                    let down = |idx| SweepIndex::shifted(idx, axis, -1);
                    let inv_dx = grid.axis(axis).inv_dx()[sweep.fixed(axis)];
                    // 先做同列差分，横向不变的场得到精确的 0
                    0.25 * ((field[up(left)] - field[down(left)])
                        + (field[up(right)] - field[down(right)]))
                        * inv_dx
                };

                grad[axis.index()] = if self.metric.is_unit(axis) {
                    raw
                } else {
                    let h = self.metric.scale_factor(axis, &face);
                    match self.resolve_scale(axis, n, h)? {
                        ScaleOutcome::Regular(h) => raw / h,
                        ScaleOutcome::Clamped(h) => {
                            adjusted += 1;
                            raw / h
                        }
                        ScaleOutcome::Zeroed => {
                            adjusted += 1;
                            0.0
                        }
                    }
                };
            }

            out[n] = grad;
        }

        if adjusted > 0 {
            log::warn!(
                "{} 几何 {} 方向扫描 (固定索引 {:?}) 有 {} 个梯度分量处于坐标奇点, 按 {:?} 处理",
                self.metric.kind(),
                dir,
                sweep.transverse_indices(),
                adjusted,
                self.policy
            );
        }

        Ok(())
    }

    /// 计算梯度并写入缓存中 `species` 的位置
    ///
    /// 成功后缓存在 `[beg, end]` 内可读；失败时该示踪剂的缓存窗口作废。
    #[allow(clippy::too_many_arguments)]
    pub fn compute_cached(
        &self,
        field: &ScalarField,
        grid: &GridMetadata,
        sweep: &SweepIndex,
        beg: usize,
        end: usize,
        cache: &mut GradientCache,
        species: usize,
    ) -> PhysicsResult<()> {
        let buf = cache.begin_write(species, end);
        self.compute(field, grid, sweep, beg, end, buf)?;
        cache.commit(species, beg, end);
        Ok(())
    }

    fn check_contract(
        &self,
        field: &ScalarField,
        grid: &GridMetadata,
        sweep: &SweepIndex,
        beg: usize,
        end: usize,
        out_len: usize,
    ) {
        let (nx, ny, nz) = field.dim();
        assert_eq!(
            [nx, ny, nz],
            grid.shape(),
            "示踪剂场形状与网格不一致"
        );

        let row_len = grid.axis(sweep.dir()).len();
        assert!(
            beg <= end && end + 1 < row_len,
            "界面窗口 [{}, {}] 超出行长度 {} (需要 end + 1 < len)",
            beg,
            end,
            row_len
        );
        assert!(
            out_len > end,
            "梯度输出长度 {} 不足以容纳界面 {}",
            out_len,
            end
        );

        for axis in sweep.dir().transverse() {
            let len = grid.axis(axis).len();
            let m = sweep.fixed(axis);
            assert!(m < len, "{} 方向固定索引 {} 超出范围 {}", axis, m, len);
            if self.axes.contains(axis) {
                assert!(
                    m >= 1 && m + 1 < len,
                    "{} 方向横向模板 [{}, {}] 超出场范围 {}",
                    axis,
                    m as isize - 1,
                    m + 1,
                    len
                );
            }
        }
    }

    fn resolve_scale(&self, axis: Axis, index: usize, h: f64) -> PhysicsResult<ScaleOutcome> {
        match self.policy {
            SingularityPolicy::Clamp { min_scale } => {
                if h.is_finite() && h.abs() >= min_scale {
                    Ok(ScaleOutcome::Regular(h))
                } else if h < 0.0 {
                    Ok(ScaleOutcome::Clamped(-min_scale))
                } else {
                    Ok(ScaleOutcome::Clamped(min_scale))
                }
            }
            _ if !self.tolerance.is_singular(h) => Ok(ScaleOutcome::Regular(h)),
            SingularityPolicy::Reject => Err(PhysicsError::CoordinateSingularity {
                geometry: self.metric.kind(),
                axis,
                index,
                scale: h,
            }),
            SingularityPolicy::ZeroComponent => Ok(ScaleOutcome::Zeroed),
        }
    }
}
