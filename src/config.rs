// 该文件是 Jianying （箭影） 项目的一部分。
// src/config.rs - 配置文件
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::{path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
  annotate::AnnotationOffsets,
  mapper::SceneScale,
  playback::{MAX_TICK_INTERVAL, MIN_TICK_INTERVAL},
};

#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("读取配置文件失败: {0}")]
  IoError(#[from] std::io::Error),
  #[error("配置文件格式错误: {0}")]
  ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub playback: PlaybackConfig,
  #[serde(default)]
  pub scene: SceneScale,
  #[serde(default)]
  pub annotation: AnnotationOffsets,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackConfig {
  /// 每次前进一帧的间隔（毫秒）
  #[serde(default = "default_tick_interval_ms")]
  pub tick_interval_ms: u64,
}

fn default_tick_interval_ms() -> u64 {
  100
}

impl Default for PlaybackConfig {
  fn default() -> Self {
    Self {
      tick_interval_ms: default_tick_interval_ms(),
    }
  }
}

impl PlaybackConfig {
  /// 间隔限制在 100~120 毫秒
  pub fn tick_interval(&self) -> Duration {
    let requested = Duration::from_millis(self.tick_interval_ms);
    let clamped = requested.clamp(MIN_TICK_INTERVAL, MAX_TICK_INTERVAL);
    if clamped != requested {
      warn!(
        "播放间隔 {:?} 超出范围，使用 {:?}",
        requested, clamped
      );
    }
    clamped
  }
}

impl Config {
  pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(content)?)
  }

  pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    info!("加载配置文件: {}", path.display());
    let content = std::fs::read_to_string(path)?;
    Self::from_toml_str(&content)
  }

  /// 未给出路径时使用默认配置
  pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
    match path {
      Some(path) => Self::load(path),
      None => Ok(Self::default()),
    }
  }
}
