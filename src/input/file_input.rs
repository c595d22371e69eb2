// 该文件是 Jianying （箭影） 项目的一部分。
// src/input/file_input.rs - 分析结果文件输入
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

use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme, input::LoadAnalysis, report::AnalysisResult, url_file_path,
};

#[derive(Error, Debug)]
pub enum FileInputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("URI 路径无法解码: {0}")]
  InvalidPath(#[from] std::string::FromUtf8Error),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("分析结果解析错误: {0}")]
  ParseError(#[from] serde_json::Error),
}

/// 读取单个分析结果 JSON 文件，例如 `file:///data/result.json`
#[derive(Debug, Clone)]
pub struct FileInput {
  path: PathBuf,
}

impl FromUrlWithScheme for FileInput {
  const SCHEME: &'static str = "file";
}

impl FromUrl for FileInput {
  type Error = FileInputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      error!(
        "URI 方案不匹配: 期望 '{}', 实际 '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(FileInputError::SchemeMismatch);
    }

    Ok(FileInput {
      path: url_file_path(url)?,
    })
  }
}

impl FileInput {
  pub fn path(&self) -> &PathBuf {
    &self.path
  }
}

impl LoadAnalysis for FileInput {
  type Error = FileInputError;

  fn load_analysis(&self) -> Result<AnalysisResult, Self::Error> {
    info!("读取分析结果文件: {}", self.path.display());
    let text = std::fs::read_to_string(&self.path)?;
    Ok(AnalysisResult::from_json_str(&text)?)
  }
}
