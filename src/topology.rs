// 该文件是 Jianying （箭影） 项目的一部分。
// src/topology.rs - 骨架拓扑定义
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

use serde::Serialize;

/// 每帧关键点数量
pub const LANDMARK_COUNT: usize = 33;

/// 33 点人体关键点索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkIndex {
  Nose = 0,
  LeftEyeInner = 1,
  LeftEye = 2,
  LeftEyeOuter = 3,
  RightEyeInner = 4,
  RightEye = 5,
  RightEyeOuter = 6,
  LeftEar = 7,
  RightEar = 8,
  MouthLeft = 9,
  MouthRight = 10,
  LeftShoulder = 11,
  RightShoulder = 12,
  LeftElbow = 13,
  RightElbow = 14,
  LeftWrist = 15,
  RightWrist = 16,
  LeftPinky = 17,
  RightPinky = 18,
  LeftIndex = 19,
  RightIndex = 20,
  LeftThumb = 21,
  RightThumb = 22,
  LeftHip = 23,
  RightHip = 24,
  LeftKnee = 25,
  RightKnee = 26,
  LeftAnkle = 27,
  RightAnkle = 28,
  LeftHeel = 29,
  RightHeel = 30,
  LeftFootIndex = 31,
  RightFootIndex = 32,
}

impl LandmarkIndex {
  /// 头部参考点
  pub const HEAD: LandmarkIndex = LandmarkIndex::Nose;

  pub fn index(self) -> usize {
    self as usize
  }
}

/// 身体部位分组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyGroup {
  Arms,
  Torso,
  Legs,
  Face,
}

impl BodyGroup {
  /// 关节所属分组：0-10 面部，11-22 手臂，23-32 腿部
  pub fn of_joint(index: usize) -> Option<BodyGroup> {
    match index {
      0..=10 => Some(BodyGroup::Face),
      11..=22 => Some(BodyGroup::Arms),
      23..=32 => Some(BodyGroup::Legs),
      _ => None,
    }
  }
}

/// 骨架连线
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bone {
  pub from: LandmarkIndex,
  pub to: LandmarkIndex,
  pub group: BodyGroup,
}

const fn bone(from: LandmarkIndex, to: LandmarkIndex, group: BodyGroup) -> Bone {
  Bone { from, to, group }
}

use self::{BodyGroup::*, LandmarkIndex::*};

/// 骨架连线定义
pub const SKELETON_BONES: [Bone; 17] = [
  // 手臂
  bone(LeftShoulder, LeftElbow, Arms),
  bone(LeftElbow, LeftWrist, Arms),
  bone(RightShoulder, RightElbow, Arms),
  bone(RightElbow, RightWrist, Arms),
  // 躯干
  bone(LeftShoulder, RightShoulder, Torso),
  bone(LeftShoulder, LeftHip, Torso),
  bone(RightShoulder, RightHip, Torso),
  bone(LeftHip, RightHip, Torso),
  // 腿部
  bone(LeftHip, LeftKnee, Legs),
  bone(LeftKnee, LeftAnkle, Legs),
  bone(RightHip, RightKnee, Legs),
  bone(RightKnee, RightAnkle, Legs),
  bone(LeftAnkle, LeftFootIndex, Legs),
  bone(RightAnkle, RightFootIndex, Legs),
  // 面部参考
  bone(Nose, LeftEar, Face),
  bone(Nose, RightEar, Face),
  bone(MouthLeft, MouthRight, Face),
];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bones_stay_within_landmark_range() {
    for b in SKELETON_BONES.iter() {
      assert!(b.from.index() < LANDMARK_COUNT);
      assert!(b.to.index() < LANDMARK_COUNT);
      assert_ne!(b.from, b.to);
    }
  }

  #[test]
  fn arm_bones_touch_arm_joints() {
    for b in SKELETON_BONES.iter().filter(|b| b.group == BodyGroup::Arms) {
      assert_eq!(BodyGroup::of_joint(b.from.index()), Some(BodyGroup::Arms));
      assert_eq!(BodyGroup::of_joint(b.to.index()), Some(BodyGroup::Arms));
    }
  }

  #[test]
  fn joint_groups_cover_all_landmarks() {
    assert_eq!(BodyGroup::of_joint(0), Some(BodyGroup::Face));
    assert_eq!(BodyGroup::of_joint(12), Some(BodyGroup::Arms));
    assert_eq!(BodyGroup::of_joint(28), Some(BodyGroup::Legs));
    assert_eq!(BodyGroup::of_joint(LANDMARK_COUNT), None);
  }
}
