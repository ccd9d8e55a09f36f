// apps/td_cli/src/commands/mod.rs

//! 子命令实现

pub mod info;
pub mod run;
pub mod validate;

use anyhow::{Context, Result};
use std::path::Path;
use td_config::TracerConfig;

/// 加载配置文件；未指定时使用默认配置
pub fn load_config(path: Option<&Path>) -> Result<TracerConfig> {
    match path {
        Some(p) => TracerConfig::from_file(p)
            .with_context(|| format!("无法加载配置文件: {}", p.display())),
        None => Ok(TracerConfig::default()),
    }
}
