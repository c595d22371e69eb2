// 该文件是 Jianying （箭影） 项目的一部分。
// src/output/jsonl_output.rs - JSON Lines 文件输出
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
  fs::{File, OpenOptions},
  io::{BufWriter, Write},
  path::{Path, PathBuf},
  sync::Mutex,
};

use thiserror::Error;
use tracing::{error, info};
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, output::Render, scene::SceneFrame, url_file_path};

#[derive(Error, Debug)]
pub enum JsonLinesOutputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("URI 路径无法解码: {0}")]
  InvalidPath(#[from] std::string::FromUtf8Error),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("序列化错误: {0}")]
  SerializeError(#[from] serde_json::Error),
  #[error("写入器锁已损坏")]
  LockPoisoned,
}

/// 每帧写入一行 JSON，`jsonl:///out/scenes.jsonl?append` 追加到已有文件
pub struct JsonLinesOutput {
  path: PathBuf,
  writer: Mutex<BufWriter<File>>,
}

impl FromUrlWithScheme for JsonLinesOutput {
  const SCHEME: &'static str = "jsonl";
}

impl FromUrl for JsonLinesOutput {
  type Error = JsonLinesOutputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      error!(
        "URI 方案不匹配: 期望 '{}', 实际 '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(JsonLinesOutputError::SchemeMismatch);
    }

    let append = url.query_pairs().any(|(k, _)| k == "append");
    Self::create(url_file_path(url)?, append)
  }
}

impl JsonLinesOutput {
  pub fn create<P: AsRef<Path>>(path: P, append: bool) -> Result<Self, JsonLinesOutputError> {
    let path = path.as_ref().to_path_buf();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
      .create(true)
      .write(true)
      .append(append)
      .truncate(!append)
      .open(&path)?;
    info!("场景输出到: {}", path.display());

    Ok(JsonLinesOutput {
      path,
      writer: Mutex::new(BufWriter::new(file)),
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl Render for JsonLinesOutput {
  type Error = JsonLinesOutputError;

  fn render_scene(&self, scene: &SceneFrame) -> Result<(), Self::Error> {
    let mut writer = self
      .writer
      .lock()
      .map_err(|_| JsonLinesOutputError::LockPoisoned)?;
    serde_json::to_writer(&mut *writer, scene)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    classify::ActiveCategories,
    frame::fixtures,
    scene::{SceneComposer, SceneInput},
  };

  fn scene(index: usize) -> SceneFrame {
    let frame = fixtures::standing_frame();
    let active = ActiveCategories::default();
    SceneComposer::default().compose(&SceneInput {
      frame: Some(&frame),
      frame_index: index,
      total_frames: 3,
      active: &active,
      overall_score: 55.0,
      phase: None,
    })
  }

  fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
      .join(format!("jianying-jsonl-{}", std::process::id()))
      .join(name)
  }

  #[test]
  fn writes_one_line_per_scene() {
    let path = scratch_path("scenes.jsonl");
    let url = Url::parse(&format!("jsonl://{}", path.display())).unwrap();
    let output = JsonLinesOutput::from_url(&url).unwrap();
    output.render_scene(&scene(0)).unwrap();
    output.render_scene(&scene(1)).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = text
      .lines()
      .map(|line| serde_json::from_str(line).unwrap())
      .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["frame_index"], 1);
    assert_eq!(lines[1]["overlay"]["frame_text"], "Frame 2 / 3");
  }

  #[test]
  fn append_keeps_existing_lines() {
    let path = scratch_path("append.jsonl");
    JsonLinesOutput::create(&path, false)
      .unwrap()
      .render_scene(&scene(0))
      .unwrap();
    JsonLinesOutput::create(&path, true)
      .unwrap()
      .render_scene(&scene(2))
      .unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
  }
}
