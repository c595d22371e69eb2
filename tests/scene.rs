// 该文件是 Jianying （箭影） 项目的一部分。
// tests/scene.rs - 场景合成集成测试
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

mod common;

use approx::assert_abs_diff_eq;
use glam::Vec3;
use jianying::{
  annotate::{AnnotationShape, LABEL_ANCHOR, LABEL_DRAW},
  colorize::Color,
  config::Config,
  frame::{Frame, Landmark},
  mapper::SceneScale,
  report::AnalysisResult,
  scene::SceneComposer,
  session::Session,
  topology::BodyGroup,
};
use serde_json::json;

fn session_with(errors: serde_json::Value) -> Session {
  let mut session = Session::default();
  let text = common::analysis_json(4, errors, 65.0);
  session.load(AnalysisResult::from_json_str(&text).unwrap());
  session
}

#[test]
fn mapper_centers_and_inverts_y() {
  let scale = SceneScale::default();
  let center = scale.map(&Landmark::new(0.5, 0.5, 0.0));
  assert_abs_diff_eq!(center.x, 0.0);
  assert_abs_diff_eq!(center.y, 0.0);

  let top_left = scale.map(&Landmark::new(0.0, 0.0, 0.25));
  assert_abs_diff_eq!(top_left.x, -2.0);
  assert_abs_diff_eq!(top_left.y, 2.0);
  assert_abs_diff_eq!(top_left.z, 0.5);
}

#[test]
fn tagged_draw_error_marks_arms_and_path() {
  let session = session_with(json!([
    {"category": "draw", "severity": "high", "message": "Uneven draw length"}
  ]));
  let scene = session.render();

  for edge in &scene.edges {
    let expected = match edge.group {
      BodyGroup::Arms => Color::ALERT,
      BodyGroup::Legs => Color::LEG_ACCENT,
      _ => Color::NEUTRAL,
    };
    assert_eq!(edge.color, expected, "edge {}-{}", edge.from, edge.to);
  }

  let arrow = scene
    .annotations
    .iter()
    .find(|a| a.label.as_deref() == Some(LABEL_DRAW))
    .unwrap();
  // 右肘 (0.7, 0.3) 映射为 (0.8, 0.8)，向右偏移 0.2
  assert_abs_diff_eq!(arrow.anchor.x, 1.0, epsilon = 1e-5);
  assert_abs_diff_eq!(arrow.anchor.y, 0.8, epsilon = 1e-5);

  let path = scene
    .annotations
    .iter()
    .find_map(|a| match a.shape {
      AnnotationShape::DashedPath { to } => Some((a.anchor, to, a.color)),
      _ => None,
    })
    .unwrap();
  assert_abs_diff_eq!((path.1 - path.0).length(), 1.0, epsilon = 1e-5);
  assert_eq!(path.2, Color::IDEAL);
}

#[test]
fn anchor_keyword_highlights_head() {
  let session = session_with(json!(["Inconsistent anchor point"]));
  let scene = session.render();

  let head = scene.joints.iter().find(|j| j.index == 0).unwrap();
  assert_eq!(head.color, Color::HEAD_HIGHLIGHT);

  let arrow = scene
    .annotations
    .iter()
    .find(|a| a.label.as_deref() == Some(LABEL_ANCHOR))
    .unwrap();
  // 右腕 (0.55, 0.2) 映射为 (0.2, 1.2)，向上偏移 0.2
  let expected = Vec3::new(0.2, 1.4, 0.0);
  assert_abs_diff_eq!(arrow.anchor.x, expected.x, epsilon = 1e-5);
  assert_abs_diff_eq!(arrow.anchor.y, expected.y, epsilon = 1e-5);
  assert_abs_diff_eq!(arrow.anchor.z, expected.z, epsilon = 1e-5);
}

#[test]
fn short_frame_has_no_skeleton_or_category_annotations() {
  let composer = SceneComposer::from_config(&Config::default());
  let mut session = Session::new(composer);
  let short: Vec<serde_json::Value> = (0..30)
    .map(|_| json!({"x": 0.5, "y": 0.5, "z": 0.0}))
    .collect();
  let text = json!({
    "pose_data": [
      {"pose_landmarks": common::standing_landmarks()},
      {"pose_landmarks": short}
    ],
    "analysis": {
      "overall_score": 35,
      "stance_analysis": {"errors": ["Stance too narrow"]},
      "recommendations": []
    }
  })
  .to_string();
  session.load(AnalysisResult::from_json_str(&text).unwrap());

  assert!(session.render().has_skeleton());
  session.seek(1);
  let scene = session.render();
  assert!(!scene.has_skeleton());
  assert!(scene.annotations.iter().all(|a| a.category.is_none()));
  assert_eq!(scene.overlay.frame_text, "Frame 2 / 2");
}

#[test]
fn unknown_keywords_leave_default_palette() {
  let session = session_with(json!(["Great follow-through"]));
  let scene = session.render();
  assert!(scene.edges.iter().all(|e| e.color != Color::ALERT));
  assert_eq!(scene.annotations.len(), 2);

  let frame: Frame = serde_json::from_value(json!({
    "pose_landmarks": common::standing_landmarks()
  }))
  .unwrap();
  assert!(frame.is_complete());
}
