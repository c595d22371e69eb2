// 该文件是 Jianying （箭影） 项目的一部分。
// src/classify.rs - 错误分类
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
use tracing::debug;

use crate::report::ErrorEntry;

/// 标注类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
  Stance,
  Alignment,
  Draw,
  Anchor,
}

impl ErrorCategory {
  pub const ALL: [ErrorCategory; 4] = [
    ErrorCategory::Stance,
    ErrorCategory::Alignment,
    ErrorCategory::Draw,
    ErrorCategory::Anchor,
  ];

  fn slot(self) -> usize {
    self as usize
  }

  /// 旧式文本错误的关键词
  fn keywords(self) -> &'static [&'static str] {
    match self {
      ErrorCategory::Stance => &["stance"],
      ErrorCategory::Alignment => &["shoulder", "alignment"],
      ErrorCategory::Draw => &["draw", "elbow"],
      ErrorCategory::Anchor => &["anchor"],
    }
  }

  /// 文本错误没有严重程度，按类别给出
  fn keyword_severity(self) -> Severity {
    match self {
      ErrorCategory::Stance => Severity::High,
      _ => Severity::Medium,
    }
  }
}

/// 严重程度
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
  Low,
  #[default]
  Medium,
  High,
}

/// 当前分析中被激活的类别，以及激活它的最高严重程度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveCategories {
  slots: [Option<Severity>; 4],
}

impl ActiveCategories {
  pub fn is_active(&self, category: ErrorCategory) -> bool {
    self.slots[category.slot()].is_some()
  }

  pub fn severity(&self, category: ErrorCategory) -> Option<Severity> {
    self.slots[category.slot()]
  }

  pub fn is_empty(&self) -> bool {
    self.slots.iter().all(Option::is_none)
  }

  pub fn len(&self) -> usize {
    self.slots.iter().filter(|s| s.is_some()).count()
  }

  /// 按固定顺序遍历激活类别
  pub fn iter(&self) -> impl Iterator<Item = (ErrorCategory, Severity)> + '_ {
    ErrorCategory::ALL
      .into_iter()
      .filter_map(|c| self.severity(c).map(|s| (c, s)))
  }

  pub fn activate(&mut self, category: ErrorCategory, severity: Severity) {
    let slot = &mut self.slots[category.slot()];
    *slot = Some(slot.map_or(severity, |s| s.max(severity)));
  }
}

impl FromIterator<(ErrorCategory, Severity)> for ActiveCategories {
  fn from_iter<I: IntoIterator<Item = (ErrorCategory, Severity)>>(iter: I) -> Self {
    let mut active = ActiveCategories::default();
    for (category, severity) in iter {
      active.activate(category, severity);
    }
    active
  }
}

/// 单条错误对应的类别
pub fn entry_categories(entry: &ErrorEntry) -> Vec<(ErrorCategory, Severity)> {
  match entry {
    ErrorEntry::Tagged(tagged) => vec![(tagged.category, tagged.severity)],
    ErrorEntry::Text(text) => {
      let lower = text.to_lowercase();
      ErrorCategory::ALL
        .into_iter()
        .filter(|c| c.keywords().iter().any(|k| lower.contains(k)))
        .map(|c| (c, c.keyword_severity()))
        .collect()
    }
  }
}

/// 对整份报告的错误进行分类，每次加载分析时计算一次
pub fn classify<'a, I>(entries: I) -> ActiveCategories
where
  I: IntoIterator<Item = &'a ErrorEntry>,
{
  let active: ActiveCategories = entries
    .into_iter()
    .flat_map(|entry| {
      let categories = entry_categories(entry);
      debug!("错误 \"{}\" 分类为 {:?}", entry.message(), categories);
      categories
    })
    .collect();
  debug!("激活类别数量: {}", active.len());
  active
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::report::TaggedError;

  fn text(entries: &[&str]) -> Vec<ErrorEntry> {
    entries.iter().map(|s| ErrorEntry::Text(s.to_string())).collect()
  }

  fn categories(active: &ActiveCategories) -> Vec<ErrorCategory> {
    active.iter().map(|(c, _)| c).collect()
  }

  #[test]
  fn stance_entry_activates_only_stance() {
    let active = classify(&text(&["Stance width too narrow"]));
    assert_eq!(categories(&active), vec![ErrorCategory::Stance]);
  }

  #[test]
  fn anchor_and_elbow_entries() {
    let active = classify(&text(&["Inconsistent anchor point", "Elbow drops during draw"]));
    assert_eq!(
      categories(&active),
      vec![ErrorCategory::Draw, ErrorCategory::Anchor]
    );
  }

  #[test]
  fn empty_entries_activate_nothing() {
    let active = classify(&Vec::<ErrorEntry>::new());
    assert!(active.is_empty());
    assert_eq!(active.len(), 0);
  }

  #[test]
  fn keyword_match_is_case_insensitive() {
    let active = classify(&text(&["Poor body ALIGNMENT - shoulder/hip misalignment of 12.0°"]));
    assert_eq!(categories(&active), vec![ErrorCategory::Alignment]);
    assert_eq!(active.severity(ErrorCategory::Alignment), Some(Severity::Medium));
  }

  #[test]
  fn single_entry_may_hit_several_categories() {
    let active = classify(&text(&["Inconsistent shoulder position during draw"]));
    assert!(active.is_active(ErrorCategory::Alignment));
    assert!(active.is_active(ErrorCategory::Draw));
    assert!(!active.is_active(ErrorCategory::Stance));
  }

  #[test]
  fn tagged_entry_skips_keyword_matching() {
    let entries = vec![ErrorEntry::Tagged(TaggedError {
      category: ErrorCategory::Draw,
      severity: Severity::Low,
      message: "anchor drifted while drawing".to_string(),
    })];
    let active = classify(&entries);
    assert_eq!(categories(&active), vec![ErrorCategory::Draw]);
    assert_eq!(active.severity(ErrorCategory::Draw), Some(Severity::Low));
  }

  #[test]
  fn keeps_highest_severity() {
    let mut active = ActiveCategories::default();
    active.activate(ErrorCategory::Anchor, Severity::Low);
    active.activate(ErrorCategory::Anchor, Severity::High);
    active.activate(ErrorCategory::Anchor, Severity::Medium);
    assert_eq!(active.severity(ErrorCategory::Anchor), Some(Severity::High));
  }
}
