// 该文件是 Jianying （箭影） 项目的一部分。
// src/output/stdout_output.rs - 标准输出摘要
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

use std::io::Write;

use thiserror::Error;
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, output::Render, scene::SceneFrame};

#[derive(Error, Debug)]
pub enum StdoutOutputError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
}

/// 每帧打印一行摘要，`stdout:?annotations` 额外列出标注
#[derive(Debug, Clone, Default)]
pub struct StdoutOutput {
  annotations: bool,
}

impl FromUrlWithScheme for StdoutOutput {
  const SCHEME: &'static str = "stdout";
}

impl FromUrl for StdoutOutput {
  type Error = StdoutOutputError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      return Err(StdoutOutputError::SchemeMismatch);
    }
    Ok(StdoutOutput {
      annotations: url.query_pairs().any(|(k, _)| k == "annotations"),
    })
  }
}

/// 一帧的摘要行
pub fn summary_line(scene: &SceneFrame) -> String {
  let phase = scene
    .overlay
    .phase
    .map(|phase| phase.to_string())
    .unwrap_or_else(|| "-".to_string());
  format!(
    "{} | {} | {} {} | phase: {} | joints: {} edges: {} annotations: {}",
    scene.overlay.frame_text,
    scene.overlay.score_text,
    scene.overlay.skill.icon,
    scene.overlay.skill.label,
    phase,
    scene.joints.len(),
    scene.edges.len(),
    scene.annotations.len()
  )
}

impl StdoutOutput {
  fn write_scene<W: Write>(&self, writer: &mut W, scene: &SceneFrame) -> std::io::Result<()> {
    writeln!(writer, "{}", summary_line(scene))?;
    if self.annotations {
      for directive in &scene.annotations {
        let category = directive
          .category
          .map(|c| format!("{:?}", c))
          .unwrap_or_else(|| "overlay".to_string());
        writeln!(
          writer,
          "  - [{}] {:?} @ ({:.2}, {:.2}, {:.2}) {}",
          category,
          directive.shape,
          directive.anchor.x,
          directive.anchor.y,
          directive.anchor.z,
          directive.label.as_deref().unwrap_or("")
        )?;
      }
    }
    Ok(())
  }
}

impl Render for StdoutOutput {
  type Error = StdoutOutputError;

  fn render_scene(&self, scene: &SceneFrame) -> Result<(), Self::Error> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    self.write_scene(&mut lock, scene)?;
    Ok(())
  }
}
