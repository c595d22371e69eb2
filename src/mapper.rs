// 该文件是 Jianying （箭影） 项目的一部分。
// src/mapper.rs - 归一化坐标到场景坐标的映射
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
use serde::Deserialize;

use crate::{
  frame::{Frame, Landmark},
  topology::{LANDMARK_COUNT, LandmarkIndex},
};

const SCALE_X: f32 = 4.0;
const SCALE_Y: f32 = 4.0;
const SCALE_Z: f32 = 2.0;

/// 场景缩放系数
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SceneScale {
  #[serde(default = "default_scale_x")]
  pub x: f32,
  #[serde(default = "default_scale_y")]
  pub y: f32,
  #[serde(default = "default_scale_z")]
  pub z: f32,
}

fn default_scale_x() -> f32 {
  SCALE_X
}

fn default_scale_y() -> f32 {
  SCALE_Y
}

fn default_scale_z() -> f32 {
  SCALE_Z
}

impl Default for SceneScale {
  fn default() -> Self {
    Self {
      x: SCALE_X,
      y: SCALE_Y,
      z: SCALE_Z,
    }
  }
}

impl SceneScale {
  /// 源坐标 Y 轴向下，场景 Y 轴向上，因此取反
  pub fn map(&self, landmark: &Landmark) -> Vec3 {
    Vec3::new(
      (landmark.x - 0.5) * self.x,
      -(landmark.y - 0.5) * self.y,
      landmark.z * self.z,
    )
  }
}

/// 映射到场景坐标后的一帧姿态
///
/// 不完整的帧映射为空姿态；坐标非有限的关键点视为缺失。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedPose {
  joints: Vec<Option<Vec3>>,
}

impl MappedPose {
  pub fn from_frame(frame: &Frame, scale: &SceneScale) -> Self {
    if !frame.is_complete() {
      return Self::default();
    }

    let joints = frame.landmarks()[..LANDMARK_COUNT]
      .iter()
      .map(|lm| lm.is_finite().then(|| scale.map(lm)))
      .collect();
    Self { joints }
  }

  pub fn is_empty(&self) -> bool {
    self.joints.is_empty()
  }

  pub fn get(&self, index: LandmarkIndex) -> Option<Vec3> {
    self.joints.get(index.index()).copied().flatten()
  }

  /// 所有存在的关节 (索引, 位置)
  pub fn joints(&self) -> impl Iterator<Item = (usize, Vec3)> + '_ {
    self
      .joints
      .iter()
      .enumerate()
      .filter_map(|(i, p)| p.map(|p| (i, p)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::frame::fixtures;
  use approx::assert_abs_diff_eq;

  #[test]
  fn maps_center_to_origin() {
    let p = SceneScale::default().map(&Landmark::new(0.5, 0.5, 0.0));
    assert_eq!(p, Vec3::ZERO);
  }

  #[test]
  fn inverts_y_axis() {
    let scale = SceneScale::default();
    let up = scale.map(&Landmark::new(0.5, 0.25, 0.0));
    let down = scale.map(&Landmark::new(0.5, 0.75, 0.0));
    assert_abs_diff_eq!(up.y, 1.0);
    assert_abs_diff_eq!(down.y, -1.0);
  }

  #[test]
  fn applies_scale_constants() {
    let p = SceneScale::default().map(&Landmark::new(1.0, 0.0, 0.5));
    assert_abs_diff_eq!(p.x, 2.0);
    assert_abs_diff_eq!(p.y, 2.0);
    assert_abs_diff_eq!(p.z, 1.0);
  }

  #[test]
  fn mapping_is_deterministic() {
    let scale = SceneScale::default();
    let lm = Landmark::new(0.37, 0.81, -0.12);
    assert_eq!(scale.map(&lm), scale.map(&lm));
  }

  #[test]
  fn incomplete_frame_maps_to_empty_pose() {
    let frame = Frame::from(vec![Landmark::new(0.5, 0.5, 0.0); 30]);
    let pose = MappedPose::from_frame(&frame, &SceneScale::default());
    assert!(pose.is_empty());
    assert_eq!(pose.get(LandmarkIndex::Nose), None);
  }

  #[test]
  fn non_finite_landmark_is_absent() {
    let mut landmarks = fixtures::standing_frame().landmarks().to_vec();
    landmarks[LandmarkIndex::RightElbow.index()].x = f32::NAN;
    let pose = MappedPose::from_frame(&Frame::from(landmarks), &SceneScale::default());
    assert!(pose.get(LandmarkIndex::RightElbow).is_none());
    assert!(pose.get(LandmarkIndex::RightWrist).is_some());
    assert_eq!(pose.joints().count(), LANDMARK_COUNT - 1);
  }
}
