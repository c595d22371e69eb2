// 该文件是 Jianying （箭影） 项目的一部分。
// src/output.rs - 场景输出定义
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

use thiserror::Error;
use url::Url;

use crate::{FromUrl, scene::SceneFrame};

/// 场景帧的输出目标
pub trait Render: Sized {
  type Error;
  fn render_scene(&self, scene: &SceneFrame) -> Result<(), Self::Error>;
}

#[cfg(feature = "stdout_output")]
mod stdout_output;
#[cfg(feature = "stdout_output")]
pub use self::stdout_output::{StdoutOutput, StdoutOutputError};

#[cfg(feature = "jsonl_output")]
mod jsonl_output;
#[cfg(feature = "jsonl_output")]
pub use self::jsonl_output::{JsonLinesOutput, JsonLinesOutputError};

#[cfg(feature = "directory_record")]
mod directory_record;
#[cfg(feature = "directory_record")]
pub use self::directory_record::{DirectoryRecordOutput, DirectoryRecordOutputError};

#[derive(Error, Debug)]
pub enum OutputError {
  #[cfg(feature = "stdout_output")]
  #[error("标准输出错误: {0}")]
  StdoutOutputError(#[from] StdoutOutputError),
  #[cfg(feature = "jsonl_output")]
  #[error("JSON Lines 输出错误: {0}")]
  JsonLinesOutputError(#[from] JsonLinesOutputError),
  #[cfg(feature = "directory_record")]
  #[error("目录记录输出错误: {0}")]
  DirectoryRecordOutputError(#[from] DirectoryRecordOutputError),
  #[error("URI 方案不匹配")]
  SchemeMismatch,
}

pub enum OutputWrapper {
  #[cfg(feature = "stdout_output")]
  StdoutOutput(StdoutOutput),
  #[cfg(feature = "jsonl_output")]
  JsonLinesOutput(JsonLinesOutput),
  #[cfg(feature = "directory_record")]
  DirectoryRecordOutput(DirectoryRecordOutput),
}

impl FromUrl for OutputWrapper {
  type Error = OutputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    #[cfg(any(
      feature = "stdout_output",
      feature = "jsonl_output",
      feature = "directory_record"
    ))]
    use crate::FromUrlWithScheme;

    match url.scheme() {
      #[cfg(feature = "stdout_output")]
      StdoutOutput::SCHEME => {
        let output = StdoutOutput::from_url(url)?;
        Ok(OutputWrapper::StdoutOutput(output))
      }
      #[cfg(feature = "jsonl_output")]
      JsonLinesOutput::SCHEME => {
        let output = JsonLinesOutput::from_url(url)?;
        Ok(OutputWrapper::JsonLinesOutput(output))
      }
      #[cfg(feature = "directory_record")]
      DirectoryRecordOutput::SCHEME => {
        let output = DirectoryRecordOutput::from_url(url)?;
        Ok(OutputWrapper::DirectoryRecordOutput(output))
      }
      _ => Err(OutputError::SchemeMismatch),
    }
  }
}

impl Render for OutputWrapper {
  type Error = OutputError;

  fn render_scene(&self, scene: &SceneFrame) -> Result<(), Self::Error> {
    match self {
      #[cfg(feature = "stdout_output")]
      OutputWrapper::StdoutOutput(output) => output.render_scene(scene).map_err(OutputError::from),
      #[cfg(feature = "jsonl_output")]
      OutputWrapper::JsonLinesOutput(output) => {
        output.render_scene(scene).map_err(OutputError::from)
      }
      #[cfg(feature = "directory_record")]
      OutputWrapper::DirectoryRecordOutput(output) => {
        output.render_scene(scene).map_err(OutputError::from)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_scheme_is_rejected() {
    let url = Url::parse("rtsp://localhost:8554/live").unwrap();
    assert!(matches!(
      OutputWrapper::from_url(&url),
      Err(OutputError::SchemeMismatch)
    ));
  }

  #[cfg(feature = "stdout_output")]
  #[test]
  fn stdout_scheme_dispatches() {
    let url = Url::parse("stdout:").unwrap();
    assert!(matches!(
      OutputWrapper::from_url(&url),
      Ok(OutputWrapper::StdoutOutput(_))
    ));
  }
}
