// 该文件是 Jianying （箭影） 项目的一部分。
// src/colorize.rs - 骨架着色
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

use std::fmt;

use serde::{Serialize, Serializer};

use crate::{
  classify::{ActiveCategories, ErrorCategory, Severity},
  topology::{Bone, BodyGroup, LandmarkIndex},
};

/// RGB 颜色，序列化为 `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
  pub const ALERT: Color = Color(255, 68, 79); // #ff444f
  pub const WARNING: Color = Color(252, 109, 47); // #fc6d2f
  pub const CAUTION: Color = Color(230, 230, 0); // #e6e600
  pub const ARM_ACCENT: Color = Color(0, 180, 255); // #00b4ff
  pub const LEG_ACCENT: Color = Color(0, 223, 183); // #00dfb7
  pub const NEUTRAL: Color = Color(243, 243, 243); // #f3f3f3
  pub const HEAD_HIGHLIGHT: Color = Color(255, 215, 0); // #ffd700
  pub const IDEAL: Color = Color(0, 243, 68); // #00f344
  pub const LABEL: Color = Color(255, 255, 255);

  pub fn new(r: u8, g: u8, b: u8) -> Self {
    Self(r, g, b)
  }

  pub fn for_severity(severity: Severity) -> Self {
    match severity {
      Severity::High => Color::ALERT,
      Severity::Medium => Color::WARNING,
      Severity::Low => Color::CAUTION,
    }
  }
}

impl fmt::Display for Color {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
  }
}

impl Serialize for Color {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

/// 根据身体部位与激活的错误类别给骨架着色
#[derive(Debug, Clone, Copy)]
pub struct SkeletonColorizer<'a> {
  active: &'a ActiveCategories,
}

impl<'a> SkeletonColorizer<'a> {
  pub fn new(active: &'a ActiveCategories) -> Self {
    Self { active }
  }

  fn is_alert(&self, group: BodyGroup) -> bool {
    match group {
      BodyGroup::Arms => {
        self.active.is_active(ErrorCategory::Draw)
          || self.active.is_active(ErrorCategory::Alignment)
      }
      BodyGroup::Legs => self.active.is_active(ErrorCategory::Stance),
      BodyGroup::Torso | BodyGroup::Face => false,
    }
  }

  pub fn group_color(&self, group: BodyGroup) -> Color {
    if self.is_alert(group) {
      return Color::ALERT;
    }
    match group {
      BodyGroup::Arms => Color::ARM_ACCENT,
      BodyGroup::Legs => Color::LEG_ACCENT,
      BodyGroup::Torso | BodyGroup::Face => Color::NEUTRAL,
    }
  }

  pub fn bone_color(&self, bone: &Bone) -> Color {
    self.group_color(bone.group)
  }

  pub fn joint_color(&self, index: usize) -> Color {
    if index == LandmarkIndex::HEAD.index() && self.active.is_active(ErrorCategory::Anchor) {
      return Color::HEAD_HIGHLIGHT;
    }
    BodyGroup::of_joint(index)
      .map(|group| self.group_color(group))
      .unwrap_or(Color::NEUTRAL)
  }
}
