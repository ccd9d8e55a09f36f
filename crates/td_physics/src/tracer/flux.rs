// crates/td_physics/src/tracer/flux.rs

//! 示踪剂扩散通量组装
//!
//! 对每种示踪剂：
//!
//! 1. 调用 [`GradientOperator`] 填充梯度缓存
//! 2. 按单元宽度加权插值界面密度
//! 3. 通量 `F = ρ_face · χ · ∂C/∂l_d`，再经过通量定律修正
//!
//! # 扩散系数
//!
//! $$\chi = \frac{2 U L / Re}{U_{unit} L_{unit}}$$
//!
//! 每次调用重新计算，在一次运行中保持不变。
//!
//! # 使用示例
//!
//! ```ignore
//! let assembler = FluxAssembler::from_config(&config)?;
//! let mut cache = GradientCache::new(config.n_tracer, row_len);
//! let mut flux = FluxOutput::zeros((row_len, config.n_tracer));
//! assembler.assemble(&tracers, &grid, &row, beg, end, &mut cache, &mut flux)?;
//! ```

use ndarray::Array1;
use td_config::{FluxLaw, RunParameters, TracerConfig};
use td_foundation::TdError;

use super::cache::GradientCache;
use super::gradient::GradientOperator;
use crate::error::{PhysicsError, PhysicsResult};
use crate::fields::{FluxOutput, ScalarField};
use crate::mesh::GridMetadata;
use crate::sweep::RowContext;

// ============================================================
// 界面插值
// ============================================================

/// 按单元宽度加权的界面密度
///
/// `(ρ_l·w_l + ρ_r·w_r) / (w_l + w_r)`
#[inline]
pub fn interface_density(rho_l: f64, w_l: f64, rho_r: f64, w_r: f64) -> f64 {
    (rho_l * w_l + rho_r * w_r) / (w_l + w_r)
}

/// 将界面 `n` 处的全部原始变量插值写入 `out`
///
/// # Panics
///
/// `out` 长度与原始变量数不一致，或 `n + 1` 超出行长度时 panic。
pub fn interface_primitives_into(row: &RowContext<'_>, n: usize, w_l: f64, w_r: f64, out: &mut [f64]) {
    assert_eq!(out.len(), row.n_vars(), "界面原始变量缓冲区长度不匹配");
    let prims = row.primitives();
    let inv_w = 1.0 / (w_l + w_r);
    for (v, slot) in out.iter_mut().enumerate() {
        *slot = (prims[[n, v]] * w_l + prims[[n + 1, v]] * w_r) * inv_w;
    }
}

/// 界面 `n` 处的全部原始变量，`widths` 为沿扫描方向的单元宽度
pub fn interface_primitives(row: &RowContext<'_>, n: usize, widths: &[f64]) -> Array1<f64> {
    let mut out = Array1::zeros(row.n_vars());
    if let Some(slice) = out.as_slice_mut() {
        interface_primitives_into(row, n, widths[n], widths[n + 1], slice);
    }
    out
}

// ============================================================
// 通量定律
// ============================================================

/// 对经典通量应用通量定律
#[inline]
pub fn apply_flux_law(law: FluxLaw, classical: f64) -> f64 {
    match law {
        FluxLaw::Linear => classical,
        FluxLaw::Saturated { q_sat } => q_sat / (classical.abs() + q_sat) * classical,
    }
}

// ============================================================
// 通量组装器
// ============================================================

/// 扩散通量组装器
#[derive(Debug)]
pub struct FluxAssembler {
    operator: GradientOperator,
    run: RunParameters,
    law: FluxLaw,
    n_tracer: usize,
}

impl FluxAssembler {
    /// 创建组装器（线性通量定律）
    pub fn new(operator: GradientOperator, run: RunParameters, n_tracer: usize) -> Self {
        Self {
            operator,
            run,
            law: FluxLaw::Linear,
            n_tracer,
        }
    }

    /// 从配置创建（先验证配置）
    pub fn from_config(config: &TracerConfig) -> PhysicsResult<Self> {
        config.validate()?;
        let operator = GradientOperator::from_config(config)?;
        Ok(Self::new(operator, config.run, config.n_tracer).with_flux_law(config.flux_law))
    }

    /// 设置通量定律
    pub fn with_flux_law(mut self, law: FluxLaw) -> Self {
        self.law = law;
        self
    }

    /// 梯度算子
    pub fn operator(&self) -> &GradientOperator {
        &self.operator
    }

    /// 运行参数
    pub fn run_parameters(&self) -> &RunParameters {
        &self.run
    }

    /// 通量定律
    pub fn flux_law(&self) -> FluxLaw {
        self.law
    }

    /// 示踪剂数量
    pub fn n_tracer(&self) -> usize {
        self.n_tracer
    }

    /// 无量纲扩散系数
    #[inline]
    pub fn diffusivity(&self) -> f64 {
        self.run.diffusivity()
    }

    /// 组装 `[beg, end]` 内每个界面、每种示踪剂的扩散通量
    ///
    /// 结果写入 `flux[[n, species]]`；窗口外元素保持不变。
    /// `tracers` 多于 `n_tracer` 时只使用前 `n_tracer` 个。
    ///
    /// # Errors
    ///
    /// - 示踪剂场少于 `n_tracer`
    /// - `flux` 形状不足以容纳窗口
    /// - 梯度算子返回的错误（方向未激活、坐标奇点）
    ///
    /// # Panics
    ///
    /// 索引窗口违约时 panic，见 [`GradientOperator::compute`]。
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        &self,
        tracers: &[ScalarField],
        grid: &GridMetadata,
        row: &RowContext<'_>,
        beg: usize,
        end: usize,
        cache: &mut GradientCache,
        flux: &mut FluxOutput,
    ) -> PhysicsResult<()> {
        if tracers.len() < self.n_tracer {
            return Err(PhysicsError::SpeciesMismatch {
                expected: self.n_tracer,
                actual: tracers.len(),
            });
        }
        let (rows, cols) = flux.dim();
        if rows <= end || cols < self.n_tracer {
            return Err(PhysicsError::OutputShape {
                required: (end + 1, self.n_tracer),
                actual: (rows, cols),
            });
        }

        let sweep = row.sweep();
        let dir = sweep.dir();
        let widths = grid.axis(dir).dx();
        assert_eq!(
            row.len(),
            widths.len(),
            "行原始变量长度与 {} 方向网格不一致",
            dir
        );

        let chi = self.diffusivity();
        let d = dir.index();

        for (species, field) in tracers.iter().take(self.n_tracer).enumerate() {
            self.operator
                .compute_cached(field, grid, sweep, beg, end, cache, species)?;
            let grads = cache.window(species).ok_or_else(|| {
                TdError::internal(format!("示踪剂 {} 的梯度缓存窗口缺失", species))
            })?;

            for (n, grad) in (beg..=end).zip(grads) {
                let rho_face =
                    interface_density(row.density(n), widths[n], row.density(n + 1), widths[n + 1]);
                flux[[n, species]] = apply_flux_law(self.law, rho_face * chi * grad[d]);
            }
        }

        log::trace!(
            "{} 方向行 {:?} 通量组装完成: 界面 [{}, {}], {} 种示踪剂",
            dir,
            sweep.transverse_indices(),
            beg,
            end,
            self.n_tracer
        );

        Ok(())
    }
}
