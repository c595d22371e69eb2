// 该文件是 Jianying （箭影） 项目的一部分。
// src/annotate.rs - 纠错标注生成
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
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
  classify::{ActiveCategories, ErrorCategory, Severity},
  colorize::Color,
  mapper::MappedPose,
  topology::LandmarkIndex,
};

const ARC_RADIUS: f32 = 0.3;
const ARC_SEGMENTS: usize = 20;

pub const LABEL_STANCE: &str = "Adjust Stance Width";
pub const LABEL_SHOULDERS: &str = "Level Shoulders";
pub const LABEL_DRAW: &str = "Smooth Draw Path";
pub const LABEL_ANCHOR: &str = "Consistent Anchor";

/// 标注的几何形状
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationShape {
  Arrow {
    direction: Vec3,
    length: f32,
  },
  AngleArc {
    /// 弧度
    angle: f32,
    radius: f32,
    points: Vec<Vec3>,
  },
  DashedPath {
    to: Vec3,
  },
  HighlightZone {
    radius: f32,
    opacity: f32,
  },
  TextLabel,
}

/// 一条绘制指令
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationDirective {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<ErrorCategory>,
  pub anchor: Vec3,
  #[serde(flatten)]
  pub shape: AnnotationShape,
  pub color: Color,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
}

impl AnnotationDirective {
  pub fn text_label(anchor: Vec3, text: impl Into<String>) -> Self {
    Self {
      category: None,
      anchor,
      shape: AnnotationShape::TextLabel,
      color: Color::LABEL,
      label: Some(text.into()),
    }
  }
}

/// 标注位置的固定偏移量
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnnotationOffsets {
  pub stance: [f32; 3],
  pub stance_direction: [f32; 3],
  pub shoulder: [f32; 3],
  pub shoulder_direction: [f32; 3],
  pub elbow: [f32; 3],
  pub elbow_direction: [f32; 3],
  pub wrist: [f32; 3],
  pub wrist_direction: [f32; 3],
  pub arrow_length: f32,
  pub anchor_zone_radius: f32,
  pub anchor_zone_opacity: f32,
}

impl Default for AnnotationOffsets {
  fn default() -> Self {
    Self {
      stance: [0.0, -0.2, 0.0],
      stance_direction: [1.0, 0.0, 0.0],
      shoulder: [0.3, 0.0, 0.0],
      shoulder_direction: [0.0, 1.0, 0.0],
      elbow: [0.2, 0.0, 0.0],
      elbow_direction: [1.0, 0.0, 0.0],
      wrist: [0.0, 0.2, 0.0],
      wrist_direction: [0.0, 1.0, 0.0],
      arrow_length: 0.3,
      anchor_zone_radius: 0.15,
      anchor_zone_opacity: 0.3,
    }
  }
}

/// 根据激活类别生成标注
#[derive(Debug, Clone, Default)]
pub struct AnnotationGenerator {
  offsets: AnnotationOffsets,
}

impl AnnotationGenerator {
  pub fn new(offsets: AnnotationOffsets) -> Self {
    Self { offsets }
  }

  pub fn generate(&self, pose: &MappedPose, active: &ActiveCategories) -> Vec<AnnotationDirective> {
    let mut directives = Vec::new();
    for (category, severity) in active.iter() {
      let before = directives.len();
      match category {
        ErrorCategory::Stance => self.stance(pose, severity, &mut directives),
        ErrorCategory::Alignment => self.alignment(pose, severity, &mut directives),
        ErrorCategory::Draw => self.draw(pose, severity, &mut directives),
        ErrorCategory::Anchor => self.anchor(pose, severity, &mut directives),
      }
      trace!("类别 {:?} 生成 {} 条标注", category, directives.len() - before);
    }
    directives
  }

  fn arrow(
    &self,
    category: ErrorCategory,
    anchor: Vec3,
    direction: [f32; 3],
    severity: Severity,
    label: &str,
  ) -> AnnotationDirective {
    AnnotationDirective {
      category: Some(category),
      anchor,
      shape: AnnotationShape::Arrow {
        direction: Vec3::from_array(direction).normalize_or_zero(),
        length: self.offsets.arrow_length,
      },
      color: Color::for_severity(severity),
      label: Some(label.to_string()),
    }
  }

  fn stance(&self, pose: &MappedPose, severity: Severity, out: &mut Vec<AnnotationDirective>) {
    let ankles = pose
      .get(LandmarkIndex::LeftAnkle)
      .zip(pose.get(LandmarkIndex::RightAnkle));
    if let Some((left, right)) = ankles {
      let anchor = (left + right) * 0.5 + Vec3::from_array(self.offsets.stance);
      out.push(self.arrow(
        ErrorCategory::Stance,
        anchor,
        self.offsets.stance_direction,
        severity,
        LABEL_STANCE,
      ));
    }
  }

  fn alignment(&self, pose: &MappedPose, severity: Severity, out: &mut Vec<AnnotationDirective>) {
    let left = pose.get(LandmarkIndex::LeftShoulder);
    let right = pose.get(LandmarkIndex::RightShoulder);

    if let (Some(left), Some(right)) = (left, right) {
      let delta = right - left;
      let angle = delta.y.atan2(delta.x);
      out.push(AnnotationDirective {
        category: Some(ErrorCategory::Alignment),
        anchor: left,
        shape: AnnotationShape::AngleArc {
          angle,
          radius: ARC_RADIUS,
          points: arc_points(left, ARC_RADIUS, angle, ARC_SEGMENTS),
        },
        color: Color::for_severity(severity),
        label: Some(format!("{:.1}°", angle.to_degrees())),
      });
    }

    if let Some(right) = right {
      out.push(self.arrow(
        ErrorCategory::Alignment,
        right + Vec3::from_array(self.offsets.shoulder),
        self.offsets.shoulder_direction,
        severity,
        LABEL_SHOULDERS,
      ));
    }
  }

  fn draw(&self, pose: &MappedPose, severity: Severity, out: &mut Vec<AnnotationDirective>) {
    if let Some(elbow) = pose.get(LandmarkIndex::RightElbow) {
      out.push(self.arrow(
        ErrorCategory::Draw,
        elbow + Vec3::from_array(self.offsets.elbow),
        self.offsets.elbow_direction,
        severity,
        LABEL_DRAW,
      ));
    }

    // 理想拉弓路径：沿水平方向延伸一个单位
    if let Some(shoulder) = pose.get(LandmarkIndex::RightShoulder) {
      out.push(AnnotationDirective {
        category: Some(ErrorCategory::Draw),
        anchor: shoulder,
        shape: AnnotationShape::DashedPath {
          to: shoulder + Vec3::X,
        },
        color: Color::IDEAL,
        label: None,
      });
    }
  }

  fn anchor(&self, pose: &MappedPose, severity: Severity, out: &mut Vec<AnnotationDirective>) {
    if let Some(wrist) = pose.get(LandmarkIndex::RightWrist) {
      out.push(self.arrow(
        ErrorCategory::Anchor,
        wrist + Vec3::from_array(self.offsets.wrist),
        self.offsets.wrist_direction,
        severity,
        LABEL_ANCHOR,
      ));
    }

    if let Some(head) = pose.get(LandmarkIndex::HEAD) {
      out.push(AnnotationDirective {
        category: Some(ErrorCategory::Anchor),
        anchor: head,
        shape: AnnotationShape::HighlightZone {
          radius: self.offsets.anchor_zone_radius,
          opacity: self.offsets.anchor_zone_opacity,
        },
        color: Color::HEAD_HIGHLIGHT,
        label: None,
      });
    }
  }
}

/// 以 center 为圆心，从 0 到 angle 的圆弧采样点（XY 平面）
fn arc_points(center: Vec3, radius: f32, angle: f32, segments: usize) -> Vec<Vec3> {
  (0..=segments)
    .map(|i| {
      let t = angle * i as f32 / segments as f32;
      center + Vec3::new(t.cos() * radius, t.sin() * radius, 0.0)
    })
    .collect()
}
