// 该文件是 Jianying （箭影） 项目的一部分。
// src/skill.rs - 技术水平评级
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

use crate::colorize::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
  Expert,
  Advanced,
  Intermediate,
  Beginner,
  NeedsPractice,
}

/// 评级徽章
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillBadge {
  pub level: SkillLevel,
  pub label: &'static str,
  pub color: Color,
  pub icon: &'static str,
}

// 从高到低，下界包含
const BANDS: [(f64, SkillBadge); 4] = [
  (
    80.0,
    SkillBadge {
      level: SkillLevel::Expert,
      label: "Expert",
      color: Color(0, 243, 68),
      icon: "🏆",
    },
  ),
  (
    60.0,
    SkillBadge {
      level: SkillLevel::Advanced,
      label: "Advanced",
      color: Color(0, 180, 255),
      icon: "🎯",
    },
  ),
  (
    40.0,
    SkillBadge {
      level: SkillLevel::Intermediate,
      label: "Intermediate",
      color: Color(230, 230, 0),
      icon: "🏹",
    },
  ),
  (
    20.0,
    SkillBadge {
      level: SkillLevel::Beginner,
      label: "Beginner",
      color: Color(252, 109, 47),
      icon: "🌱",
    },
  ),
];

const NEEDS_PRACTICE: SkillBadge = SkillBadge {
  level: SkillLevel::NeedsPractice,
  label: "Needs Practice",
  color: Color(255, 68, 79),
  icon: "📈",
};

impl SkillBadge {
  /// NaN 落入最低档
  pub fn from_score(score: f64) -> Self {
    BANDS
      .iter()
      .find(|(lower, _)| score >= *lower)
      .map(|(_, badge)| *badge)
      .unwrap_or(NEEDS_PRACTICE)
  }
}
