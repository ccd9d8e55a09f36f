// crates/td_physics/src/tracer/mod.rs

//! 示踪剂扩散通量模块
//!
//! # 子模块
//!
//! - [`cache`]: 梯度缓存（每个工作线程一份）
//! - [`gradient`]: 界面梯度算子
//! - [`flux`]: 扩散通量组装、界面插值与通量定律
//! - [`driver`]: 整块网格的方向扫描驱动
//!
//! # 调用关系
//!
//! ```text
//! DirectionalSweep ──(每行)──> FluxAssembler ──(每种示踪剂)──> GradientOperator
//!                                    │                               │
//!                                    └────── GradientCache <─────────┘
//! ```
//!
//! # 使用示例
//!
//! ```ignore
//! use td_physics::tracer::DirectionalSweep;
//!
//! let sweep = DirectionalSweep::from_config(&config)?;
//! let out = sweep.run(Axis::I, &tracers, &primitives, RHO)?;
//! println!("max |F| = {}", out.stats.max_abs);
//! ```

pub mod cache;
pub mod driver;
pub mod flux;
pub mod gradient;

pub use cache::{FaceGradient, GradientCache};
pub use driver::{DirectionalSweep, SweepOutput, SweepStats};
pub use flux::{
    apply_flux_law, interface_density, interface_primitives, interface_primitives_into,
    FluxAssembler,
};
pub use gradient::GradientOperator;
