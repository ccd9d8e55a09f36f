// crates/td_physics/tests/flux_properties.rs

//! 扩散通量性质测试
//!
//! 覆盖：离散梯度精度、横向分量、界面密度插值、Reynolds 缩放、
//! 均匀场零通量以及 5 单元参考算例。

use ndarray::Array2;
use td_config::{GeometryKind, RunParameters, TracerConfig};
use td_foundation::{ActiveAxes, Axis};
use td_physics::fields::{density_from_fn, scalar_from_fn, uniform_scalar};
use td_physics::geometry::Cartesian;
use td_physics::tracer::interface_density;
use td_physics::{
    AxisGrid, DirectionalSweep, FluxAssembler, FluxOutput, GradientCache, GradientOperator,
    GridMetadata, RowContext, SweepIndex, RHO,
};

const ALL_GEOMETRIES: [GeometryKind; 4] = [
    GeometryKind::Cartesian,
    GeometryKind::Cylindrical,
    GeometryKind::Polar,
    GeometryKind::Spherical,
];

/// 远离坐标奇点的配置
fn geometry_config(geometry: GeometryKind) -> TracerConfig {
    let mut config = TracerConfig::default();
    config.geometry = geometry;
    config.dimensions = geometry.max_dimensions();
    config.mesh.cells = [6, 5, 4];
    config.mesh.lower = [1.0, 0.4, 0.0];
    config.mesh.upper = [2.0, 1.4, 1.0];
    config.mesh.ghost = 2;
    config.run.reynolds = 10.0;
    config
}

/// 1D 参考算例：5 个单元, dx = 0.1, ρ = 1, C = [0, 1, 2, 3, 4], REYNOLDS = 10
fn five_cell_config() -> TracerConfig {
    let mut config = TracerConfig::default();
    config.dimensions = 1;
    config.mesh.cells = [5, 1, 1];
    config.mesh.lower = [0.0; 3];
    config.mesh.upper = [0.5, 1.0, 1.0];
    config.mesh.ghost = 1;
    config.run = RunParameters::new(1.0, 1.0, 10.0, 1.0, 1.0);
    config
}

#[test]
fn test_five_cell_reference_case() {
    let config = five_cell_config();
    let sweep = DirectionalSweep::from_config(&config).unwrap();
    assert!((sweep.assembler().diffusivity() - 0.2).abs() < 1e-14);

    let grid = sweep.grid();
    let tracer = scalar_from_fn(grid, |x| (x[0] - 0.05) / 0.1);
    // 内部单元 1..=5 的浓度为 0..=4
    for (n, expected) in (1..=5).zip(0..5) {
        assert!((tracer[[n, 0, 0]] - expected as f64).abs() < 1e-10);
    }

    let prims = density_from_fn(grid, |_| 1.0);
    let out = sweep.run(Axis::I, &[tracer], &prims, RHO).unwrap();

    // 内部界面 1..=4 (单元 n 与 n+1 之间)
    for n in 1..=4 {
        assert!((out.flux[[n, 0, 0, 0]] - 2.0).abs() < 1e-10, "界面 {}", n);
    }
    assert!((out.stats.max_abs - 2.0).abs() < 1e-10);
}

#[test]
fn test_along_axis_matches_difference_quotient() {
    let h = 0.05;
    let grid = GridMetadata::new([
        AxisGrid::uniform(20, 2, 0.0, 20.0 * h).unwrap(),
        AxisGrid::degenerate(0.5, 1.0).unwrap(),
        AxisGrid::degenerate(0.5, 1.0).unwrap(),
    ]);
    let field = scalar_from_fn(&grid, |x| (3.0 * x[0]).sin());
    let op = GradientOperator::new(Box::new(Cartesian), ActiveAxes::from_dimensions(1).unwrap());

    let sweep = SweepIndex::new(Axis::I, [0; 3]);
    let mut out = vec![[0.0; 3]; 24];
    op.compute(&field, &grid, &sweep, 1, 22, &mut out).unwrap();

    for n in 1..=22 {
        let expected = (field[[n + 1, 0, 0]] - field[[n, 0, 0]]) / h;
        assert!((out[n][0] - expected).abs() < 1e-9);
    }
}

#[test]
fn test_transverse_components_vanish_for_axis_only_field() {
    for geometry in ALL_GEOMETRIES {
        let config = geometry_config(geometry);
        let sweep = DirectionalSweep::from_config(&config).unwrap();
        let grid = sweep.grid();
        let op = sweep.assembler().operator();
        let mut cache = GradientCache::new(1, 16);

        for dir in op.active_axes().iter() {
            let d = dir.index();
            let field = scalar_from_fn(grid, |x| x[d] * x[d] + 0.3 * x[d]);
            let (beg, end) = sweep.interface_window(dir).unwrap();

            for row in sweep.rows(dir) {
                op.compute_cached(&field, grid, &row, beg, end, &mut cache, 0)
                    .unwrap();
                for n in beg..=end {
                    for t in dir.transverse() {
                        assert_eq!(
                            cache.component(0, n, t),
                            Some(0.0),
                            "{} 几何 {} 方向扫描, {} 分量",
                            geometry,
                            dir,
                            t
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_interface_density_weighting() {
    // 等宽时为算术平均
    assert!((interface_density(1.2, 0.3, 2.0, 0.3) - 1.6).abs() < 1e-14);

    // 正宽度时落在 [min, max] 内
    let widths = [0.01, 0.1, 1.0, 7.5];
    for &w_l in &widths {
        for &w_r in &widths {
            let rho = interface_density(0.8, w_l, 3.1, w_r);
            assert!((0.8..=3.1).contains(&rho));
        }
    }
}

#[test]
fn test_doubling_reynolds_halves_flux() {
    for geometry in ALL_GEOMETRIES {
        let config = geometry_config(geometry);
        let mut doubled = config.clone();
        doubled.run.reynolds *= 2.0;

        let a = DirectionalSweep::from_config(&config).unwrap();
        let b = DirectionalSweep::from_config(&doubled).unwrap();
        let grid = a.grid();
        let tracer = scalar_from_fn(grid, |x| x[0] * (1.0 + x[1]) + x[2].cos());
        let prims = density_from_fn(grid, |x| 0.5 + x[0]);

        for dir in a.assembler().operator().active_axes().iter() {
            let fa = a.run(dir, std::slice::from_ref(&tracer), &prims, RHO).unwrap();
            let fb = b.run(dir, std::slice::from_ref(&tracer), &prims, RHO).unwrap();
            for (x, y) in fa.flux.iter().zip(fb.flux.iter()) {
                assert!((0.5 * x - y).abs() < 1e-12);
            }
        }
    }
}

#[test]
fn test_uniform_tracer_gives_zero_flux() {
    for geometry in ALL_GEOMETRIES {
        let mut config = geometry_config(geometry);
        config.n_tracer = 2;
        let sweep = DirectionalSweep::from_config(&config).unwrap();
        let grid = sweep.grid();
        let tracers = vec![uniform_scalar(grid, 0.7), uniform_scalar(grid, -3.0)];
        let prims = density_from_fn(grid, |x| 1.0 + x[0] * x[1] + x[2]);

        for out in sweep.run_all(&tracers, &prims, RHO).unwrap() {
            assert!(out.flux.iter().all(|&f| f == 0.0), "{} 几何", geometry);
            assert_eq!(out.stats.max_abs, 0.0);
        }
    }
}

#[test]
fn test_density_column_selection() {
    let config = five_cell_config();
    let assembler = FluxAssembler::from_config(&config).unwrap();
    let grid = GridMetadata::from_mesh_config(&config.mesh, 1).unwrap();
    let tracer = scalar_from_fn(&grid, |x| 10.0 * x[0]);

    // 第 0 列为速度，第 1 列为密度
    let mut prims = Array2::<f64>::zeros((7, 2));
    prims.column_mut(0).fill(-5.0);
    prims.column_mut(1).fill(3.0);
    let row = RowContext::with_rho_index(prims.view(), SweepIndex::new(Axis::I, [0; 3]), 1);

    let mut cache = GradientCache::new(1, 7);
    let mut flux = FluxOutput::zeros((7, 1));
    assembler
        .assemble(&[tracer], &grid, &row, 0, 5, &mut cache, &mut flux)
        .unwrap();

    // ρ = 3, χ = 0.2, ∂C/∂x = 10
    for n in 0..=5 {
        assert!((flux[[n, 0]] - 6.0).abs() < 1e-10);
    }
}
