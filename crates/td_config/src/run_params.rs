// crates/td_config/src/run_params.rs

//! 运行参数与扩散系数
//!
//! 扩散系数由三个运行参数和两个归一化常数决定：
//!
//! ```text
//! χ = (2·U_FLOW·LENGTH / REYNOLDS) / (UNIT_LENGTH·UNIT_VELOCITY)
//! ```
//!
//! 归一化常数未显式给出时分别取 LENGTH 与 U_FLOW。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 运行参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// 特征速度 U_FLOW
    #[serde(default = "default_u_flow")]
    pub u_flow: f64,

    /// 参考长度 LENGTH
    #[serde(default = "default_length")]
    pub length: f64,

    /// 扩散控制参数 REYNOLDS
    #[serde(default = "default_reynolds")]
    pub reynolds: f64,

    /// 长度归一化常数 UNIT_LENGTH（缺省为 LENGTH）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_length: Option<f64>,

    /// 速度归一化常数 UNIT_VELOCITY（缺省为 U_FLOW）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_velocity: Option<f64>,
}

fn default_u_flow() -> f64 { 1.0 }
fn default_length() -> f64 { 1.0 }
fn default_reynolds() -> f64 { 1000.0 }

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            u_flow: default_u_flow(),
            length: default_length(),
            reynolds: default_reynolds(),
            unit_length: None,
            unit_velocity: None,
        }
    }
}

impl RunParameters {
    /// 指定全部五个参数
    pub fn new(
        u_flow: f64,
        length: f64,
        reynolds: f64,
        unit_length: f64,
        unit_velocity: f64,
    ) -> Self {
        Self {
            u_flow,
            length,
            reynolds,
            unit_length: Some(unit_length),
            unit_velocity: Some(unit_velocity),
        }
    }

    /// 生效的长度归一化常数
    #[inline]
    pub fn unit_length(&self) -> f64 {
        self.unit_length.unwrap_or(self.length)
    }

    /// 生效的速度归一化常数
    #[inline]
    pub fn unit_velocity(&self) -> f64 {
        self.unit_velocity.unwrap_or(self.u_flow)
    }

    /// 有量纲扩散系数 χ = 2·U_FLOW·LENGTH / REYNOLDS
    #[inline]
    pub fn dimensional_diffusivity(&self) -> f64 {
        2.0 * self.u_flow * self.length / self.reynolds
    }

    /// 无量纲扩散系数
    #[inline]
    pub fn diffusivity(&self) -> f64 {
        self.dimensional_diffusivity() / (self.unit_length() * self.unit_velocity())
    }

    /// 验证参数有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("run.reynolds", self.reynolds)?;
        check_finite("run.u_flow", self.u_flow)?;
        check_finite("run.length", self.length)?;
        check_positive("run.unit_length", self.unit_length())?;
        check_positive("run.unit_velocity", self.unit_velocity())?;
        Ok(())
    }
}

fn check_finite(key: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "必须为有限值".to_string(),
        });
    }
    Ok(())
}

fn check_positive(key: &str, value: f64) -> Result<(), ConfigError> {
    check_finite(key, value)?;
    if value <= 0.0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "必须为正".to_string(),
        });
    }
    Ok(())
}
