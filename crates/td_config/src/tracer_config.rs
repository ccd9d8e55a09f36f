// crates/td_config/src/tracer_config.rs

//! TracerConfig - 示踪剂扩散通量配置
//!
//! 定义计算核心的所有配置参数：几何类型、空间维数、示踪剂数量、
//! 运行参数、通量定律、奇点策略、网格与并行设置。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::geometry::GeometryKind;
use crate::run_params::RunParameters;

/// 示踪剂扩散通量配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracerConfig {
    /// 坐标系几何
    #[serde(default)]
    pub geometry: GeometryKind,

    /// 空间维数 (1/2/3)
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// 示踪剂种类数
    #[serde(default = "default_n_tracer")]
    pub n_tracer: usize,

    /// 运行参数
    #[serde(default)]
    pub run: RunParameters,

    /// 通量定律
    #[serde(default)]
    pub flux_law: FluxLaw,

    /// 坐标奇点处理策略
    #[serde(default)]
    pub singularity: SingularityPolicy,

    /// 网格配置
    #[serde(default)]
    pub mesh: MeshConfig,

    /// 并行配置
    #[serde(default)]
    pub parallel: ParallelConfig,
}

fn default_dimensions() -> usize { 2 }
fn default_n_tracer() -> usize { 1 }

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryKind::default(),
            dimensions: default_dimensions(),
            n_tracer: default_n_tracer(),
            run: RunParameters::default(),
            flux_law: FluxLaw::default(),
            singularity: SingularityPolicy::default(),
            mesh: MeshConfig::default(),
            parallel: ParallelConfig::default(),
        }
    }
}

/// 通量定律
///
/// - `Linear`: 线性 Fick 扩散 `F = ρ·χ·∇C`
/// - `Saturated`: Spitzer 型饱和通量 `F = q/(|F_class| + q)·F_class`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FluxLaw {
    /// 无限制的线性扩散
    #[default]
    Linear,
    /// 饱和（限通量）扩散
    Saturated {
        /// 饱和通量 q (> 0)
        q_sat: f64,
    },
}

/// 坐标奇点处理策略
///
/// 极坐标与球坐标在 r → 0 或 sinθ → 0 处度量因子无定义。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SingularityPolicy {
    /// 返回错误，要求网格避开奇点
    #[default]
    Reject,
    /// 将尺度因子截断到 `min_scale`（保持符号）
    Clamp {
        /// 尺度因子下限 (> 0)
        min_scale: f64,
    },
    /// 将受影响的梯度分量置零
    ZeroComponent,
}

/// 网格配置（均匀结构网格）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshConfig {
    /// 各方向内部单元数
    #[serde(default = "default_cells")]
    pub cells: [usize; 3],

    /// 各方向下边界坐标
    #[serde(default = "default_lower")]
    pub lower: [f64; 3],

    /// 各方向上边界坐标
    #[serde(default = "default_upper")]
    pub upper: [f64; 3],

    /// 每侧幽灵单元数
    #[serde(default = "default_ghost")]
    pub ghost: usize,
}

fn default_cells() -> [usize; 3] { [64, 64, 1] }
fn default_lower() -> [f64; 3] { [0.0, 0.0, 0.0] }
fn default_upper() -> [f64; 3] { [1.0, 1.0, 1.0] }
fn default_ghost() -> usize { 2 }

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            cells: default_cells(),
            lower: default_lower(),
            upper: default_upper(),
            ghost: default_ghost(),
        }
    }
}

/// 并行配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// 是否启用按行并行
    #[serde(default = "default_parallel_enabled")]
    pub enabled: bool,

    /// 启用并行的最少行数
    #[serde(default = "default_min_rows")]
    pub min_rows: usize,
}

fn default_parallel_enabled() -> bool { true }
fn default_min_rows() -> usize { 64 }

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_parallel_enabled(),
            min_rows: default_min_rows(),
        }
    }
}

impl TracerConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;

        let config: TracerConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 维数验证
        if self.dimensions == 0 || self.dimensions > 3 {
            return Err(ConfigError::InvalidValue {
                key: "dimensions".to_string(),
                value: self.dimensions.to_string(),
                reason: "维数必须为 1、2 或 3".to_string(),
            });
        }

        if self.dimensions > self.geometry.max_dimensions() {
            return Err(ConfigError::InvalidValue {
                key: "dimensions".to_string(),
                value: self.dimensions.to_string(),
                reason: format!(
                    "{} 几何最多支持 {} 维",
                    self.geometry,
                    self.geometry.max_dimensions()
                ),
            });
        }

        if self.n_tracer == 0 {
            return Err(ConfigError::InvalidValue {
                key: "n_tracer".to_string(),
                value: "0".to_string(),
                reason: "至少需要一种示踪剂".to_string(),
            });
        }

        self.run.validate()?;

        if let FluxLaw::Saturated { q_sat } = self.flux_law {
            if !(q_sat.is_finite() && q_sat > 0.0) {
                return Err(ConfigError::InvalidValue {
                    key: "flux_law.q_sat".to_string(),
                    value: q_sat.to_string(),
                    reason: "饱和通量必须为正".to_string(),
                });
            }
        }

        if let SingularityPolicy::Clamp { min_scale } = self.singularity {
            if !(min_scale.is_finite() && min_scale > 0.0) {
                return Err(ConfigError::InvalidValue {
                    key: "singularity.min_scale".to_string(),
                    value: min_scale.to_string(),
                    reason: "尺度因子下限必须为正".to_string(),
                });
            }
        }

        self.validate_mesh()
    }

    fn validate_mesh(&self) -> Result<(), ConfigError> {
        let mesh = &self.mesh;

        // 横向模板需要至少一层幽灵单元
        if mesh.ghost == 0 {
            return Err(ConfigError::InvalidValue {
                key: "mesh.ghost".to_string(),
                value: "0".to_string(),
                reason: "至少需要一层幽灵单元".to_string(),
            });
        }

        for axis in 0..self.dimensions {
            if mesh.cells[axis] == 0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("mesh.cells[{}]", axis),
                    value: "0".to_string(),
                    reason: "活动方向单元数必须为正".to_string(),
                });
            }
            if !(mesh.upper[axis] > mesh.lower[axis]) {
                return Err(ConfigError::InvalidValue {
                    key: format!("mesh.upper[{}]", axis),
                    value: mesh.upper[axis].to_string(),
                    reason: "上边界必须大于下边界".to_string(),
                });
            }
        }

        if self.geometry.has_coordinate_singularity() && mesh.lower[0] < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "mesh.lower[0]".to_string(),
                value: mesh.lower[0].to_string(),
                reason: "径向坐标不能为负".to_string(),
            });
        }

        // 极角越过极点后 r·sinθ 变号，奇点策略无法察觉
        if self.geometry == GeometryKind::Spherical {
            if mesh.lower[1] < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: "mesh.lower[1]".to_string(),
                    value: mesh.lower[1].to_string(),
                    reason: "极角必须位于 [0, π]".to_string(),
                });
            }
            if mesh.upper[1] > std::f64::consts::PI {
                return Err(ConfigError::InvalidValue {
                    key: "mesh.upper[1]".to_string(),
                    value: mesh.upper[1].to_string(),
                    reason: "极角必须位于 [0, π]".to_string(),
                });
            }
        }

        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(ConfigError::Io)?;
        Ok(())
    }
}
