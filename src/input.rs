// 该文件是 Jianying （箭影） 项目的一部分。
// src/input.rs - 分析结果输入
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

use crate::{FromUrl, report::AnalysisResult};

pub trait LoadAnalysis {
  type Error;
  fn load_analysis(&self) -> Result<AnalysisResult, Self::Error>;
}

#[cfg(feature = "file_input")]
mod file_input;
#[cfg(feature = "file_input")]
pub use self::file_input::{FileInput, FileInputError};

#[cfg(feature = "results_input")]
mod results_input;
#[cfg(feature = "results_input")]
pub use self::results_input::{ResultsDirectoryInput, ResultsDirectoryInputError};

#[derive(Error, Debug)]
pub enum InputError {
  #[cfg(feature = "file_input")]
  #[error("分析文件输入错误: {0}")]
  FileInputError(#[from] FileInputError),
  #[cfg(feature = "results_input")]
  #[error("结果目录输入错误: {0}")]
  ResultsDirectoryInputError(#[from] ResultsDirectoryInputError),
  #[error("URI 方案不匹配")]
  SchemeMismatch,
}

pub enum InputWrapper {
  #[cfg(feature = "file_input")]
  File(FileInput),
  #[cfg(feature = "results_input")]
  ResultsDirectory(ResultsDirectoryInput),
}

impl FromUrl for InputWrapper {
  type Error = InputError;

  fn from_url(url: &url::Url) -> Result<Self, Self::Error> {
    #[cfg(feature = "file_input")]
    {
      use crate::FromUrlWithScheme;

      if url.scheme() == FileInput::SCHEME {
        return Ok(InputWrapper::File(FileInput::from_url(url)?));
      }
    }
    #[cfg(feature = "results_input")]
    {
      use crate::FromUrlWithScheme;

      if url.scheme() == ResultsDirectoryInput::SCHEME {
        return Ok(InputWrapper::ResultsDirectory(
          ResultsDirectoryInput::from_url(url)?,
        ));
      }
    }
    Err(InputError::SchemeMismatch)
  }
}

impl LoadAnalysis for InputWrapper {
  type Error = InputError;

  fn load_analysis(&self) -> Result<AnalysisResult, Self::Error> {
    match self {
      #[cfg(feature = "file_input")]
      InputWrapper::File(input) => input.load_analysis().map_err(InputError::from),
      #[cfg(feature = "results_input")]
      InputWrapper::ResultsDirectory(input) => input.load_analysis().map_err(InputError::from),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_scheme_is_rejected() {
    let url = url::Url::parse("rtsp://camera/stream").unwrap();
    assert!(matches!(
      InputWrapper::from_url(&url),
      Err(InputError::SchemeMismatch)
    ));
  }
}
