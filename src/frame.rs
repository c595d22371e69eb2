// 该文件是 Jianying （箭影） 项目的一部分。
// src/frame.rs - 姿态帧定义
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

use serde::{Deserialize, Serialize};

use crate::topology::{LANDMARK_COUNT, LandmarkIndex};

/// 单个关键点，坐标为归一化坐标
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
  pub x: f32,
  pub y: f32,
  pub z: f32,
  /// 姿态估计给出的可见度，仅透传
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub visibility: Option<f32>,
}

impl Landmark {
  pub fn new(x: f32, y: f32, z: f32) -> Self {
    Self {
      x,
      y,
      z,
      visibility: None,
    }
  }

  pub fn is_finite(&self) -> bool {
    self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
  }
}

/// 一帧姿态数据
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
  /// 原视频中的帧号
  #[serde(default, rename = "frame", skip_serializing_if = "Option::is_none")]
  pub source_frame: Option<u64>,
  /// 时间戳（秒）
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timestamp: Option<f64>,
  #[serde(rename = "pose_landmarks", default)]
  landmarks: Box<[Landmark]>,
}

impl From<Vec<Landmark>> for Frame {
  fn from(landmarks: Vec<Landmark>) -> Self {
    Self {
      source_frame: None,
      timestamp: None,
      landmarks: landmarks.into_boxed_slice(),
    }
  }
}

impl Frame {
  pub fn with_timing(mut self, source_frame: u64, timestamp: f64) -> Self {
    self.source_frame = Some(source_frame);
    self.timestamp = Some(timestamp);
    self
  }

  /// 关键点数量不足 33 的帧不可渲染
  pub fn is_complete(&self) -> bool {
    self.landmarks.len() >= LANDMARK_COUNT
  }

  pub fn len(&self) -> usize {
    self.landmarks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.landmarks.is_empty()
  }

  pub fn landmarks(&self) -> &[Landmark] {
    &self.landmarks
  }

  pub fn landmark(&self, index: LandmarkIndex) -> Option<&Landmark> {
    self.landmarks.get(index.index())
  }
}

/// 姿态序列，只读
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoseSequence {
  frames: Vec<Frame>,
}

impl From<Vec<Frame>> for PoseSequence {
  fn from(frames: Vec<Frame>) -> Self {
    Self { frames }
  }
}

impl PoseSequence {
  pub fn len(&self) -> usize {
    self.frames.len()
  }

  pub fn is_empty(&self) -> bool {
    self.frames.is_empty()
  }

  pub fn get(&self, index: usize) -> Option<&Frame> {
    self.frames.get(index)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
    self.frames.iter()
  }

  /// 不完整帧数量
  pub fn incomplete_frames(&self) -> usize {
    self.frames.iter().filter(|f| !f.is_complete()).count()
  }
}

impl<'a> IntoIterator for &'a PoseSequence {
  type Item = &'a Frame;
  type IntoIter = std::slice::Iter<'a, Frame>;

  fn into_iter(self) -> Self::IntoIter {
    self.frames.iter()
  }
}

#[cfg(test)]
pub(crate) mod fixtures {
  use super::*;

  /// 一个站姿端正的完整帧
  pub fn standing_frame() -> Frame {
    let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
    let mut set = |i: LandmarkIndex, x: f32, y: f32| {
      landmarks[i.index()] = Landmark::new(x, y, 0.0);
    };
    set(LandmarkIndex::Nose, 0.5, 0.15);
    set(LandmarkIndex::LeftShoulder, 0.4, 0.3);
    set(LandmarkIndex::RightShoulder, 0.6, 0.3);
    set(LandmarkIndex::LeftElbow, 0.3, 0.3);
    set(LandmarkIndex::RightElbow, 0.7, 0.3);
    set(LandmarkIndex::LeftWrist, 0.2, 0.3);
    set(LandmarkIndex::RightWrist, 0.55, 0.2);
    set(LandmarkIndex::LeftHip, 0.45, 0.6);
    set(LandmarkIndex::RightHip, 0.55, 0.6);
    set(LandmarkIndex::LeftKnee, 0.45, 0.75);
    set(LandmarkIndex::RightKnee, 0.55, 0.75);
    set(LandmarkIndex::LeftAnkle, 0.4, 0.9);
    set(LandmarkIndex::RightAnkle, 0.6, 0.9);
    Frame::from(landmarks)
  }

  pub fn sequence(len: usize) -> PoseSequence {
    PoseSequence::from(
      (0..len)
        .map(|i| standing_frame().with_timing(i as u64 * 5, i as f64 / 6.0))
        .collect::<Vec<_>>(),
    )
  }
}
