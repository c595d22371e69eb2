// 该文件是 Jianying （箭影） 项目的一部分。
// src/scene.rs - 单帧场景描述合成
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

use glam::Vec3;
use serde::Serialize;
use tracing::debug;

use crate::{
  annotate::{AnnotationDirective, AnnotationGenerator},
  classify::ActiveCategories,
  colorize::{Color, SkeletonColorizer},
  config::Config,
  frame::Frame,
  mapper::{MappedPose, SceneScale},
  phase::ShotPhase,
  skill::SkillBadge,
  topology::{BodyGroup, SKELETON_BONES},
};

const SCORE_LABEL_ANCHOR: Vec3 = Vec3::new(-1.8, 1.8, 0.0);
const FRAME_LABEL_ANCHOR: Vec3 = Vec3::new(1.8, 1.8, 0.0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneJoint {
  pub index: usize,
  pub position: Vec3,
  pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneEdge {
  pub from: usize,
  pub to: usize,
  pub start: Vec3,
  pub end: Vec3,
  pub group: BodyGroup,
  pub color: Color,
}

/// 分数与帧位置等叠加信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
  pub score_text: String,
  pub frame_text: String,
  pub skill: SkillBadge,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phase: Option<ShotPhase>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<f64>,
}

/// 一帧完整的渲染描述，生成后不再修改
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame {
  pub frame_index: usize,
  pub total_frames: usize,
  pub joints: Vec<SceneJoint>,
  pub edges: Vec<SceneEdge>,
  pub annotations: Vec<AnnotationDirective>,
  pub overlay: Overlay,
}

impl SceneFrame {
  /// 是否绘制了骨架
  pub fn has_skeleton(&self) -> bool {
    !self.joints.is_empty()
  }
}

/// 合成所需的输入
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
  pub frame: Option<&'a Frame>,
  pub frame_index: usize,
  pub total_frames: usize,
  pub active: &'a ActiveCategories,
  pub overall_score: f64,
  pub phase: Option<ShotPhase>,
}

#[derive(Debug, Clone, Default)]
pub struct SceneComposer {
  scale: SceneScale,
  generator: AnnotationGenerator,
}

impl SceneComposer {
  pub fn new(scale: SceneScale, generator: AnnotationGenerator) -> Self {
    Self { scale, generator }
  }

  pub fn from_config(config: &Config) -> Self {
    Self::new(
      config.scene,
      AnnotationGenerator::new(config.annotation.clone()),
    )
  }

  pub fn compose(&self, input: &SceneInput<'_>) -> SceneFrame {
    let pose = match input.frame {
      Some(frame) if frame.is_complete() => MappedPose::from_frame(frame, &self.scale),
      Some(frame) => {
        debug!(
          "第 {} 帧只有 {} 个关键点，跳过骨架",
          input.frame_index,
          frame.len()
        );
        MappedPose::default()
      }
      None => MappedPose::default(),
    };

    let colorizer = SkeletonColorizer::new(input.active);

    let joints: Vec<SceneJoint> = pose
      .joints()
      .map(|(index, position)| SceneJoint {
        index,
        position,
        color: colorizer.joint_color(index),
      })
      .collect();

    let edges: Vec<SceneEdge> = SKELETON_BONES
      .iter()
      .filter_map(|bone| {
        let start = pose.get(bone.from)?;
        let end = pose.get(bone.to)?;
        Some(SceneEdge {
          from: bone.from.index(),
          to: bone.to.index(),
          start,
          end,
          group: bone.group,
          color: colorizer.bone_color(bone),
        })
      })
      .collect();

    // 向下取整，与评级区间的下界一致
    let score_text = format!("Score: {:.0}/100", input.overall_score.floor());
    let frame_text = if input.total_frames == 0 {
      "Frame 0 / 0".to_string()
    } else {
      format!("Frame {} / {}", input.frame_index + 1, input.total_frames)
    };

    let mut annotations = self.generator.generate(&pose, input.active);
    annotations.push(AnnotationDirective::text_label(
      SCORE_LABEL_ANCHOR,
      score_text.clone(),
    ));
    annotations.push(AnnotationDirective::text_label(
      FRAME_LABEL_ANCHOR,
      frame_text.clone(),
    ));

    SceneFrame {
      frame_index: input.frame_index,
      total_frames: input.total_frames,
      joints,
      edges,
      annotations,
      overlay: Overlay {
        score_text,
        frame_text,
        skill: SkillBadge::from_score(input.overall_score),
        phase: input.phase,
        timestamp: input.frame.and_then(|f| f.timestamp),
      },
    }
  }
}
