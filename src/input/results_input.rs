// 该文件是 Jianying （箭影） 项目的一部分。
// src/input/results_input.rs - 结果目录输入
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

use std::{
  path::{Path, PathBuf},
  time::SystemTime,
};

use thiserror::Error;
use tracing::{debug, error, info};
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  input::LoadAnalysis,
  report::AnalysisResult,
  url_file_path,
};

#[derive(Error, Debug)]
pub enum ResultsDirectoryInputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("非法的结果编号: {0}")]
  InvalidId(String),
  #[error("目录中没有分析结果: {0}")]
  NoResults(PathBuf),
  #[error("URI 路径无法解码: {0}")]
  InvalidPath(#[from] std::string::FromUtf8Error),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("分析结果解析错误: {0}")]
  ParseError(#[from] serde_json::Error),
}

/// 分析服务的结果目录，文件名为 `<file_id>.json`
///
/// `results:///app/backend/results?id=<uuid>` 读取指定结果，
/// 省略 `id` 时读取最近修改的结果。
#[derive(Debug, Clone)]
pub struct ResultsDirectoryInput {
  directory: PathBuf,
  id: Option<String>,
}

impl FromUrlWithScheme for ResultsDirectoryInput {
  const SCHEME: &'static str = "results";
}

impl FromUrl for ResultsDirectoryInput {
  type Error = ResultsDirectoryInputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      error!(
        "URI 方案不匹配: 期望 '{}', 实际 '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(ResultsDirectoryInputError::SchemeMismatch);
    }

    let id = url
      .query_pairs()
      .find(|(k, _)| k == "id")
      .map(|(_, v)| v.into_owned());

    if let Some(id) = &id
      && !is_valid_id(id)
    {
      return Err(ResultsDirectoryInputError::InvalidId(id.clone()));
    }

    Ok(ResultsDirectoryInput {
      directory: url_file_path(url)?,
      id,
    })
  }
}

fn is_valid_id(id: &str) -> bool {
  !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_result_file(path: &Path) -> bool {
  path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

impl ResultsDirectoryInput {
  fn latest(&self) -> Result<PathBuf, ResultsDirectoryInputError> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for entry in std::fs::read_dir(&self.directory)? {
      let path = entry?.path();
      if !is_result_file(&path) {
        continue;
      }
      let modified = std::fs::metadata(&path)?.modified()?;
      debug!("候选结果: {}", path.display());
      if latest.as_ref().is_none_or(|(time, _)| modified > *time) {
        latest = Some((modified, path));
      }
    }
    latest
      .map(|(_, path)| path)
      .ok_or_else(|| ResultsDirectoryInputError::NoResults(self.directory.clone()))
  }

  /// 将要读取的结果文件
  pub fn resolve(&self) -> Result<PathBuf, ResultsDirectoryInputError> {
    match &self.id {
      Some(id) => Ok(self.directory.join(format!("{}.json", id))),
      None => self.latest(),
    }
  }
}

impl LoadAnalysis for ResultsDirectoryInput {
  type Error = ResultsDirectoryInputError;

  fn load_analysis(&self) -> Result<AnalysisResult, Self::Error> {
    let path = self.resolve()?;
    info!("读取分析结果: {}", path.display());
    let text = std::fs::read_to_string(&path)?;
    Ok(AnalysisResult::from_json_str(&text)?)
  }
}
