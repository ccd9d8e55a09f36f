// crates/td_physics/tests/curvilinear.rs

//! 曲线坐标与边缘情况测试
//!
//! 极坐标/球坐标的度量因子、坐标奇点策略、饱和通量定律、
//! 梯度缓存扩容以及串行/并行扫描一致性。

use td_config::{FluxLaw, GeometryKind, ParallelConfig, SingularityPolicy, TracerConfig};
use td_foundation::Axis;
use td_physics::fields::{density_from_fn, primitive_row, scalar_from_fn};
use td_physics::{
    DirectionalSweep, FluxAssembler, FluxOutput, GradientCache, GridMetadata, PhysicsError,
    RowContext, SweepIndex, RHO,
};

fn curvilinear_config(geometry: GeometryKind) -> TracerConfig {
    let mut config = TracerConfig::default();
    config.geometry = geometry;
    config.dimensions = 3;
    config.mesh.cells = [8, 6, 5];
    config.mesh.lower = [1.0, 0.5, 0.0];
    config.mesh.upper = [3.0, 1.7, 1.0];
    config.mesh.ghost = 2;
    config.run.reynolds = 2.0;
    config
}

#[test]
fn test_polar_angular_derivative_scaled_by_radius() {
    let config = curvilinear_config(GeometryKind::Polar);
    let sweep = DirectionalSweep::from_config(&config).unwrap();
    let grid = sweep.grid();
    let op = sweep.assembler().operator();

    // C = 2φ，物理梯度 (1/r)·∂C/∂φ = 2/r
    let field = scalar_from_fn(grid, |x| 2.0 * x[1]);
    let (beg, end) = sweep.interface_window(Axis::J).unwrap();
    let mut cache = GradientCache::new(1, 4);

    for row in sweep.rows(Axis::J) {
        op.compute_cached(&field, grid, &row, beg, end, &mut cache, 0)
            .unwrap();
        let r = grid.axis(Axis::I).x()[row.fixed(Axis::I)];
        for n in beg..=end {
            let g = cache.get(0, n).unwrap();
            assert!((g[1] - 2.0 / r).abs() < 1e-10);
        }
    }

    // 沿径向扫描时 h2 取界面半径
    let (beg, end) = sweep.interface_window(Axis::I).unwrap();
    let row = SweepIndex::new(Axis::I, [0, 4, 3]);
    op.compute_cached(&field, grid, &row, beg, end, &mut cache, 0)
        .unwrap();
    for n in beg..=end {
        let r_face = grid.axis(Axis::I).xr()[n];
        let g = cache.get(0, n).unwrap();
        assert!((g[1] - 2.0 / r_face).abs() < 1e-10);
        assert!(g[0].abs() < 1e-12);
    }
}

#[test]
fn test_spherical_azimuthal_derivative() {
    let config = curvilinear_config(GeometryKind::Spherical);
    let sweep = DirectionalSweep::from_config(&config).unwrap();
    let grid = sweep.grid();
    let op = sweep.assembler().operator();

    // C = φ，物理梯度 1/(r·sinθ)
    let field = scalar_from_fn(grid, |x| x[2]);
    let (beg, end) = sweep.interface_window(Axis::K).unwrap();
    let mut cache = GradientCache::new(1, 16);

    for row in sweep.rows(Axis::K) {
        op.compute_cached(&field, grid, &row, beg, end, &mut cache, 0)
            .unwrap();
        let r = grid.axis(Axis::I).x()[row.fixed(Axis::I)];
        let theta = grid.axis(Axis::J).x()[row.fixed(Axis::J)];
        for n in beg..=end {
            let g = cache.get(0, n).unwrap();
            assert!((g[2] - 1.0 / (r * theta.sin())).abs() < 1e-9);
            assert!(g[0].abs() < 1e-12 && g[1].abs() < 1e-12);
        }
    }
}

#[test]
fn test_spherical_polar_sweep_uses_interface_angle() {
    let config = curvilinear_config(GeometryKind::Spherical);
    let sweep = DirectionalSweep::from_config(&config).unwrap();
    let grid = sweep.grid();
    let op = sweep.assembler().operator();

    // C = φ，沿 θ 扫描时 h3 = r·sin θ 取界面极角
    let field = scalar_from_fn(grid, |x| x[2]);
    let (beg, end) = sweep.interface_window(Axis::J).unwrap();
    let mut cache = GradientCache::new(1, 16);
    let theta_face = grid.axis(Axis::J).xr();
    let theta_centre = grid.axis(Axis::J).x();

    for row in sweep.rows(Axis::J) {
        op.compute_cached(&field, grid, &row, beg, end, &mut cache, 0)
            .unwrap();
        let r = grid.axis(Axis::I).x()[row.fixed(Axis::I)];
        for n in beg..=end {
            let g = cache.get(0, n).unwrap();
            let expected = 1.0 / (r * theta_face[n].sin());
            assert!(
                (g[2] - expected).abs() < 1e-9,
                "界面 {}: {} != {}",
                n,
                g[2],
                expected
            );
            // 单元中心极角给出的值明显不同
            assert!((g[2] - 1.0 / (r * theta_centre[n].sin())).abs() > 1e-4);
            assert_eq!(g[0], 0.0);
            assert_eq!(g[1], 0.0);
        }
    }
}

/// 径向下边界在 r = 0 的 2D 极坐标配置
fn origin_config(policy: SingularityPolicy) -> TracerConfig {
    let mut config = TracerConfig::default();
    config.geometry = GeometryKind::Polar;
    config.dimensions = 2;
    config.mesh.cells = [4, 4, 1];
    config.mesh.lower = [0.0, 0.0, 0.0];
    config.mesh.upper = [1.0, 1.0, 1.0];
    config.mesh.ghost = 1;
    config.singularity = policy;
    config
}

#[test]
fn test_singularity_reject() {
    let config = origin_config(SingularityPolicy::Reject);
    let sweep = DirectionalSweep::from_config(&config).unwrap();
    let grid = sweep.grid();
    let tracers = vec![scalar_from_fn(grid, |x| x[0] + x[1])];
    let prims = density_from_fn(grid, |_| 1.0);

    // 沿径向扫描，第一个界面在 r = 0
    let err = sweep.run(Axis::I, &tracers, &prims, RHO).unwrap_err();
    match err {
        PhysicsError::CoordinateSingularity {
            geometry,
            axis,
            index,
            scale,
        } => {
            assert_eq!(geometry, GeometryKind::Polar);
            assert_eq!(axis, Axis::J);
            assert_eq!(index, 0);
            assert_eq!(scale, 0.0);
        }
        other => panic!("unexpected error: {other}"),
    }

    // 沿角向扫描只用到单元中心半径
    assert!(sweep.run(Axis::J, &tracers, &prims, RHO).is_ok());
}

#[test]
fn test_singularity_zero_and_clamp() {
    let prims_for = |grid: &GridMetadata| density_from_fn(grid, |_| 1.0);

    let zero = DirectionalSweep::from_config(&origin_config(SingularityPolicy::ZeroComponent)).unwrap();
    let grid = zero.grid();
    let field = scalar_from_fn(grid, |x| x[0] + x[1]);
    let op = zero.assembler().operator();
    let mut cache = GradientCache::new(1, 6);

    let row = SweepIndex::new(Axis::I, [0, 2, 0]);
    op.compute_cached(&field, grid, &row, 0, 4, &mut cache, 0).unwrap();
    assert_eq!(cache.component(0, 0, Axis::J), Some(0.0));
    assert!(cache.component(0, 1, Axis::J).unwrap() > 0.0);

    // 径向通量本身不受影响
    let out = zero.run(Axis::I, std::slice::from_ref(&field), &prims_for(grid), RHO).unwrap();
    assert!(out.flux.iter().all(|f| f.is_finite()));

    let clamp = DirectionalSweep::from_config(&origin_config(SingularityPolicy::Clamp {
        min_scale: 0.1,
    }))
    .unwrap();
    let op = clamp.assembler().operator();
    op.compute_cached(&field, grid, &row, 0, 4, &mut cache, 0).unwrap();
    // ∂C/∂φ = 1，h 截断到 0.1
    assert!((cache.component(0, 0, Axis::J).unwrap() - 10.0).abs() < 1e-9);
    // r = 0.25 >= 0.1，保持原值
    assert!((cache.component(0, 1, Axis::J).unwrap() - 4.0).abs() < 1e-9);
}

#[test]
fn test_saturated_flux_bounded() {
    let q_sat = 0.05;
    let mut config = curvilinear_config(GeometryKind::Cartesian);
    config.flux_law = FluxLaw::Saturated { q_sat };

    let mut linear_config = config.clone();
    linear_config.flux_law = FluxLaw::Linear;

    let saturated = DirectionalSweep::from_config(&config).unwrap();
    let linear = DirectionalSweep::from_config(&linear_config).unwrap();
    let grid = saturated.grid();
    let tracers = vec![scalar_from_fn(grid, |x| 50.0 * (x[0] * x[0] + x[1] - x[2]))];
    let prims = density_from_fn(grid, |x| 1.0 + x[0]);

    for dir in Axis::ALL {
        let s = saturated.run(dir, &tracers, &prims, RHO).unwrap();
        let l = linear.run(dir, &tracers, &prims, RHO).unwrap();
        assert!(s.stats.max_abs < q_sat);
        assert!(l.stats.max_abs > q_sat);
        for (fs, fl) in s.flux.iter().zip(l.flux.iter()) {
            // 同号且幅值不超过线性通量
            assert!(fs * fl >= 0.0);
            assert!(fs.abs() <= fl.abs());
        }
    }
}

#[test]
fn test_cache_grows_but_never_shrinks() {
    let config = curvilinear_config(GeometryKind::Cartesian);
    let assembler = FluxAssembler::from_config(&config).unwrap();
    let grid = GridMetadata::from_mesh_config(&config.mesh, config.dimensions).unwrap();
    let tracers = vec![scalar_from_fn(&grid, |x| x[0] + 2.0 * x[1])];
    let prims = density_from_fn(&grid, |_| 1.0);

    // 初始容量故意偏小
    let mut cache = GradientCache::new(1, 3);

    // I 方向行长 12
    let sweep_i = SweepIndex::new(Axis::I, [0, 3, 3]);
    let row = RowContext::new(primitive_row(&prims, &sweep_i), sweep_i);
    let mut flux = FluxOutput::zeros((12, 1));
    assembler
        .assemble(&tracers, &grid, &row, 1, 9, &mut cache, &mut flux)
        .unwrap();
    assert_eq!(cache.capacity(), 10);

    // J 方向行长 10，窗口更短
    let sweep_j = SweepIndex::new(Axis::J, [3, 0, 3]);
    let row = RowContext::new(primitive_row(&prims, &sweep_j), sweep_j);
    let mut flux = FluxOutput::zeros((10, 1));
    assembler
        .assemble(&tracers, &grid, &row, 1, 5, &mut cache, &mut flux)
        .unwrap();
    assert_eq!(cache.capacity(), 10);
    assert!(cache.get(0, 6).is_none());
    assert!((cache.component(0, 3, Axis::J).unwrap() - 2.0).abs() < 1e-10);
}

#[test]
fn test_parallel_and_sequential_agree() {
    for geometry in [GeometryKind::Cylindrical, GeometryKind::Polar] {
        let mut config = curvilinear_config(geometry);
        config.dimensions = 2;
        config.n_tracer = 3;

        let serial = DirectionalSweep::from_config(&config)
            .unwrap()
            .with_parallel(ParallelConfig {
                enabled: false,
                min_rows: usize::MAX,
            });
        let parallel = DirectionalSweep::from_config(&config)
            .unwrap()
            .with_parallel(ParallelConfig {
                enabled: true,
                min_rows: 1,
            });

        let grid = serial.grid();
        let tracers: Vec<_> = (0..3)
            .map(|s| scalar_from_fn(grid, move |x| (s as f64 + 1.0) * (x[0] * x[1]).sin()))
            .collect();
        let prims = density_from_fn(grid, |x| 2.0 - 0.3 * x[1]);

        let a = serial.run_all(&tracers, &prims, RHO).unwrap();
        let b = parallel.run_all(&tracers, &prims, RHO).unwrap();
        assert_eq!(a.len(), 2);
        for (sa, sb) in a.iter().zip(&b) {
            assert_eq!(sa.dir, sb.dir);
            assert_eq!(sa.flux, sb.flux);
            assert_eq!(sa.stats, sb.stats);
        }
    }
}
