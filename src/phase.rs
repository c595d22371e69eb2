// 该文件是 Jianying （箭影） 项目的一部分。
// src/phase.rs - 射箭动作阶段划分
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

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShotPhase {
  Setup,
  Draw,
  Anchor,
  Release,
}

impl fmt::Display for ShotPhase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ShotPhase::Setup => "Setup",
      ShotPhase::Draw => "Draw",
      ShotPhase::Anchor => "Anchor",
      ShotPhase::Release => "Release",
    };
    f.pad(name)
  }
}

/// 半开区间 [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRange {
  pub start: usize,
  pub end: usize,
}

impl PhaseRange {
  pub fn contains(&self, index: usize) -> bool {
    self.start <= index && index < self.end
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRanges {
  pub setup: PhaseRange,
  pub draw: PhaseRange,
  pub anchor: PhaseRange,
  pub release: PhaseRange,
}

impl PhaseRanges {
  /// 按四等分划分序列
  pub fn quarters(len: usize) -> Self {
    let (q1, q2, q3) = (len / 4, len / 2, 3 * len / 4);
    Self {
      setup: PhaseRange { start: 0, end: q1 },
      draw: PhaseRange { start: q1, end: q2 },
      anchor: PhaseRange { start: q2, end: q3 },
      release: PhaseRange { start: q3, end: len },
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (ShotPhase, PhaseRange)> {
    [
      (ShotPhase::Setup, self.setup),
      (ShotPhase::Draw, self.draw),
      (ShotPhase::Anchor, self.anchor),
      (ShotPhase::Release, self.release),
    ]
    .into_iter()
  }

  pub fn phase_of(&self, index: usize) -> Option<ShotPhase> {
    self
      .iter()
      .find(|(_, range)| range.contains(index))
      .map(|(phase, _)| phase)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quarters_split_sequence() {
    let ranges = PhaseRanges::quarters(40);
    assert_eq!(ranges.phase_of(0), Some(ShotPhase::Setup));
    assert_eq!(ranges.phase_of(9), Some(ShotPhase::Setup));
    assert_eq!(ranges.phase_of(10), Some(ShotPhase::Draw));
    assert_eq!(ranges.phase_of(20), Some(ShotPhase::Anchor));
    assert_eq!(ranges.phase_of(39), Some(ShotPhase::Release));
    assert_eq!(ranges.phase_of(40), None);
  }

  #[test]
  fn short_sequence_skips_empty_phases() {
    let ranges = PhaseRanges::quarters(2);
    assert_eq!(ranges.phase_of(0), Some(ShotPhase::Draw));
    assert_eq!(ranges.phase_of(1), Some(ShotPhase::Release));
  }
}
