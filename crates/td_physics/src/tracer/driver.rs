// crates/td_physics/src/tracer/driver.rs

//! 方向扫描驱动
//!
//! 沿一个方向遍历整块网格的所有行（横向索引取内部单元），
//! 对每行调用 [`FluxAssembler`]，把结果按界面左单元索引收集到
//! `(nx, ny, nz, n_tracer)` 的数组中。
//!
//! # 并行策略
//!
//! - 行数少于 `min_rows` 或并行关闭：串行执行，共用一个梯度缓存
//! - 否则：先按行并行计算（每个 rayon 工作线程独立持有缓存），
//!   再串行写回结果数组

use ndarray::{s, Array4};
use rayon::prelude::*;
use serde::Serialize;
use td_config::{ParallelConfig, TracerConfig};
use td_foundation::{Axis, TdError};

use super::cache::GradientCache;
use super::flux::FluxAssembler;
use crate::error::{PhysicsError, PhysicsResult};
use crate::fields::{primitive_row, FluxOutput, InterfaceFluxField, PrimitiveField, ScalarField};
use crate::mesh::GridMetadata;
use crate::sweep::{RowContext, SweepIndex};

/// 单次扫描的通量统计
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SweepStats {
    /// 处理的行数
    pub n_rows: usize,
    /// 每种示踪剂写入的界面数
    pub n_interfaces: usize,
    /// 通量绝对值最大值
    pub max_abs: f64,
    /// 通量 L2 范数
    pub l2: f64,
}

impl SweepStats {
    fn accumulate(&mut self, value: f64) {
        self.max_abs = self.max_abs.max(value.abs());
        self.l2 += value * value;
    }
}

/// 单方向扫描结果
#[derive(Debug, Clone)]
pub struct SweepOutput {
    /// 扫描方向
    pub dir: Axis,
    /// 界面通量，按左单元索引存放
    pub flux: InterfaceFluxField,
    /// 统计
    pub stats: SweepStats,
}

/// 方向扫描驱动
#[derive(Debug)]
pub struct DirectionalSweep {
    assembler: FluxAssembler,
    grid: GridMetadata,
    parallel: ParallelConfig,
}

impl DirectionalSweep {
    /// 创建驱动（使用默认并行配置）
    pub fn new(assembler: FluxAssembler, grid: GridMetadata) -> Self {
        Self {
            assembler,
            grid,
            parallel: ParallelConfig::default(),
        }
    }

    /// 从配置创建：组装器、均匀网格和并行设置
    pub fn from_config(config: &TracerConfig) -> PhysicsResult<Self> {
        let assembler = FluxAssembler::from_config(config)?;
        let grid = GridMetadata::from_mesh_config(&config.mesh, config.dimensions)?;
        Ok(Self::new(assembler, grid).with_parallel(config.parallel.clone()))
    }

    /// 设置并行配置
    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// 通量组装器
    pub fn assembler(&self) -> &FluxAssembler {
        &self.assembler
    }

    /// 网格元数据
    pub fn grid(&self) -> &GridMetadata {
        &self.grid
    }

    /// 沿 `dir` 的界面窗口 `[beg, end]`
    ///
    /// 覆盖第一个内部单元的左界面到最后一个内部单元的右界面。
    pub fn interface_window(&self, dir: Axis) -> PhysicsResult<(usize, usize)> {
        let along = self.grid.axis(dir);
        if along.n_ghost() == 0 {
            return Err(TdError::invalid_mesh(format!("{} 方向没有幽灵单元, 无法构造界面窗口", dir)).into());
        }
        let beg = along.n_ghost() - 1;
        Ok((beg, beg + along.n_interior()))
    }

    /// 沿 `dir` 的全部扫描行（横向取内部单元）
    pub fn rows(&self, dir: Axis) -> Vec<SweepIndex> {
        let [a, b] = dir.transverse();
        let mut rows = Vec::new();
        for ia in self.grid.axis(a).interior() {
            for ib in self.grid.axis(b).interior() {
                let mut fixed = [0; 3];
                fixed[a.index()] = ia;
                fixed[b.index()] = ib;
                rows.push(SweepIndex::new(dir, fixed));
            }
        }
        rows
    }

    /// 沿 `dir` 扫描整块网格
    ///
    /// `primitives` 形状为 `(nx, ny, nz, n_vars)`，密度位于第 `rho_index` 列。
    pub fn run(
        &self,
        dir: Axis,
        tracers: &[ScalarField],
        primitives: &PrimitiveField,
        rho_index: usize,
    ) -> PhysicsResult<SweepOutput> {
        let n_tracer = self.assembler.n_tracer();
        if tracers.len() < n_tracer {
            return Err(PhysicsError::SpeciesMismatch {
                expected: n_tracer,
                actual: tracers.len(),
            });
        }
        self.check_shapes(tracers, primitives, rho_index)?;

        let (beg, end) = self.interface_window(dir)?;
        let row_len = self.grid.axis(dir).len();
        let rows = self.rows(dir);

        let compute_row = |sweep: SweepIndex, cache: &mut GradientCache| -> PhysicsResult<FluxOutput> {
            let view = primitive_row(primitives, &sweep);
            let row = RowContext::with_rho_index(view, sweep, rho_index);
            let mut buf = FluxOutput::zeros((row_len, n_tracer));
            self.assembler
                .assemble(tracers, &self.grid, &row, beg, end, cache, &mut buf)?;
            Ok(buf)
        };

        let parallel = self.parallel.enabled && rows.len() >= self.parallel.min_rows;
        log::debug!(
            "{} 方向扫描: {} 行, 界面 [{}, {}], {}",
            dir,
            rows.len(),
            beg,
            end,
            if parallel { "并行" } else { "串行" }
        );

        let [nx, ny, nz] = self.grid.shape();
        let mut flux = Array4::zeros((nx, ny, nz, n_tracer));
        let mut stats = SweepStats {
            n_rows: rows.len(),
            ..SweepStats::default()
        };

        if parallel {
            // 并行计算各行，每个工作线程一个缓存
            let results: Vec<(SweepIndex, FluxOutput)> = rows
                .par_iter()
                .map_init(
                    || GradientCache::new(n_tracer, row_len),
                    |cache, &sweep| compute_row(sweep, cache).map(|buf| (sweep, buf)),
                )
                .collect::<PhysicsResult<_>>()?;

            // 串行写回
            for (sweep, buf) in &results {
                scatter(&mut flux, sweep, buf, beg, end, &mut stats);
            }
        } else {
            let mut cache = GradientCache::new(n_tracer, row_len);
            for sweep in &rows {
                let buf = compute_row(*sweep, &mut cache)?;
                scatter(&mut flux, sweep, &buf, beg, end, &mut stats);
            }
        }

        stats.n_interfaces = rows.len() * (end - beg + 1);
        stats.l2 = stats.l2.sqrt();

        Ok(SweepOutput { dir, flux, stats })
    }

    /// 依次扫描所有活动方向
    pub fn run_all(
        &self,
        tracers: &[ScalarField],
        primitives: &PrimitiveField,
        rho_index: usize,
    ) -> PhysicsResult<Vec<SweepOutput>> {
        self.assembler
            .operator()
            .active_axes()
            .iter()
            .map(|dir| self.run(dir, tracers, primitives, rho_index))
            .collect()
    }

    fn check_shapes(
        &self,
        tracers: &[ScalarField],
        primitives: &PrimitiveField,
        rho_index: usize,
    ) -> PhysicsResult<()> {
        let [nx, ny, nz] = self.grid.shape();
        let (px, py, pz, n_vars) = primitives.dim();
        if [px, py, pz] != [nx, ny, nz] {
            return Err(TdError::invalid_input(format!(
                "原始变量形状 {:?} 与网格 {:?} 不一致",
                [px, py, pz],
                [nx, ny, nz]
            ))
            .into());
        }
        TdError::check_index("rho_index", rho_index, n_vars)?;

        for (species, field) in tracers.iter().take(self.assembler.n_tracer()).enumerate() {
            let (fx, fy, fz) = field.dim();
            if [fx, fy, fz] != [nx, ny, nz] {
                return Err(TdError::invalid_input(format!(
                    "示踪剂 {} 形状 {:?} 与网格 {:?} 不一致",
                    species,
                    [fx, fy, fz],
                    [nx, ny, nz]
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// 把一行的窗口结果写回整块数组
fn scatter(
    flux: &mut InterfaceFluxField,
    sweep: &SweepIndex,
    buf: &FluxOutput,
    beg: usize,
    end: usize,
    stats: &mut SweepStats,
) {
    for (n, values) in (beg..=end).zip(buf.slice(s![beg..=end, ..]).outer_iter()) {
        let [i, j, k] = sweep.cell(n);
        for (species, &value) in values.iter().enumerate() {
            flux[[i, j, k, species]] = value;
            stats.accumulate(value);
        }
    }
}
