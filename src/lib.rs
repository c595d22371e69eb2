// 该文件是 Jianying （箭影） 项目的一部分。
// src/lib.rs - 库主文件
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

pub mod annotate;
pub mod classify;
pub mod colorize;
pub mod config;
pub mod frame;
pub mod input;
pub mod mapper;
pub mod output;
pub mod phase;
pub mod playback;
pub mod report;
pub mod scene;
pub mod session;
pub mod skill;
pub mod task;
pub mod topology;

pub trait FromUrl {
  type Error;
  fn from_url(url: &url::Url) -> Result<Self, Self::Error>
  where
    Self: Sized;
}

pub trait FromUrlWithScheme: FromUrl {
  const SCHEME: &'static str;
}

/// URL 路径解码为本地路径，`Url::path` 保留百分号编码
pub(crate) fn url_file_path(
  url: &url::Url,
) -> Result<std::path::PathBuf, std::string::FromUtf8Error> {
  let path = urlencoding::decode(url.path())?;
  Ok(std::path::PathBuf::from(path.into_owned()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_file_path_decodes_percent_escapes() {
    let url = url::Url::parse("folder:///data/%E7%AE%AD%E5%BD%B1/my%20records").unwrap();
    assert_eq!(
      url_file_path(&url).unwrap(),
      std::path::PathBuf::from("/data/箭影/my records")
    );
  }

  #[test]
  fn url_file_path_rejects_invalid_utf8() {
    let url = url::Url::parse("jsonl:///data/%FF.jsonl").unwrap();
    assert!(url_file_path(&url).is_err());
  }
}
