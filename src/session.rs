// 该文件是 Jianying （箭影） 项目的一部分。
// src/session.rs - 查看会话状态
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

use tracing::{info, warn};

use crate::{
  classify::{ActiveCategories, classify},
  frame::PoseSequence,
  phase::PhaseRanges,
  playback::{PlaybackController, PlaybackState, TickOutcome, TimerToken},
  report::{AggregatedReport, AnalysisResult},
  scene::{SceneComposer, SceneFrame, SceneInput},
  skill::SkillBadge,
};

/// 已载入的一次分析
#[derive(Debug, Clone)]
pub struct LoadedAnalysis {
  pub sequence: PoseSequence,
  pub report: AggregatedReport,
  pub recommendations: Vec<String>,
  pub active: ActiveCategories,
  pub phases: PhaseRanges,
  pub skill: SkillBadge,
}

impl LoadedAnalysis {
  pub fn new(result: AnalysisResult) -> Self {
    let AnalysisResult {
      pose_data,
      analysis,
      ..
    } = result;

    let report = analysis.aggregate();
    let active = classify(&report.errors);
    let phases = analysis
      .phases
      .unwrap_or_else(|| PhaseRanges::quarters(pose_data.len()));

    Self {
      skill: SkillBadge::from_score(report.overall_score),
      sequence: pose_data,
      report,
      recommendations: analysis.recommendations,
      active,
      phases,
    }
  }
}

/// 会话持有当前分析与播放控制器，帧索引只由播放控制器修改
#[derive(Debug, Default)]
pub struct Session {
  composer: SceneComposer,
  analysis: Option<LoadedAnalysis>,
  playback: PlaybackController,
}

impl Session {
  pub fn new(composer: SceneComposer) -> Self {
    Self {
      composer,
      ..Default::default()
    }
  }

  /// 替换分析结果并重置播放状态，旧定时器随之失效
  pub fn load(&mut self, result: AnalysisResult) -> &LoadedAnalysis {
    let loaded = LoadedAnalysis::new(result);
    let incomplete = loaded.sequence.incomplete_frames();
    if incomplete > 0 {
      warn!("{} 帧关键点不完整，将不绘制骨架", incomplete);
    }
    info!(
      "载入分析结果: {} 帧，{} 条错误，得分 {}",
      loaded.sequence.len(),
      loaded.report.errors.len(),
      loaded.report.overall_score
    );

    self.playback.load(loaded.sequence.len());
    self.analysis.insert(loaded)
  }

  pub fn discard(&mut self) {
    self.playback.load(0);
    if self.analysis.take().is_some() {
      info!("已丢弃当前分析结果");
    }
  }

  pub fn analysis(&self) -> Option<&LoadedAnalysis> {
    self.analysis.as_ref()
  }

  pub fn playback_state(&self) -> PlaybackState {
    self.playback.state()
  }

  pub fn play(&mut self) -> Option<TimerToken> {
    self.playback.play()
  }

  pub fn pause(&mut self) {
    self.playback.pause();
  }

  pub fn reset(&mut self) {
    self.playback.reset();
  }

  pub fn seek(&mut self, index: usize) {
    self.playback.seek(index);
  }

  pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
    self.playback.tick(token)
  }

  /// 合成当前帧
  pub fn render(&self) -> SceneFrame {
    let index = self.playback.current_frame_index();
    let no_errors = ActiveCategories::default();

    let input = match &self.analysis {
      Some(analysis) => SceneInput {
        frame: analysis.sequence.get(index),
        frame_index: index,
        total_frames: analysis.sequence.len(),
        active: &analysis.active,
        overall_score: analysis.report.overall_score,
        phase: analysis.phases.phase_of(index),
      },
      None => SceneInput {
        frame: None,
        frame_index: 0,
        total_frames: 0,
        active: &no_errors,
        overall_score: 0.0,
        phase: None,
      },
    };
    self.composer.compose(&input)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    classify::ErrorCategory,
    frame::fixtures,
    phase::ShotPhase,
    report::{AnalysisReport, ErrorEntry, PhaseReport},
    skill::SkillLevel,
  };

  fn result(len: usize, errors: &[&str], score: f64) -> AnalysisResult {
    AnalysisResult {
      pose_data: fixtures::sequence(len),
      analysis: AnalysisReport {
        overall_score: score,
        stance_analysis: PhaseReport {
          errors: errors.iter().map(|e| ErrorEntry::Text(e.to_string())).collect(),
          ..Default::default()
        },
        ..Default::default()
      },
      ..Default::default()
    }
  }

  #[test]
  fn load_classifies_once_and_resets() {
    let mut session = Session::default();
    let loaded = session.load(result(8, &["Stance too narrow"], 85.0));
    assert!(loaded.active.is_active(ErrorCategory::Stance));
    assert_eq!(loaded.skill.level, SkillLevel::Expert);
    assert_eq!(session.playback_state(), PlaybackState::default());
  }

  #[test]
  fn render_follows_playback() {
    let mut session = Session::default();
    session.load(result(8, &[], 50.0));
    let token = session.play().unwrap();
    session.tick(token);
    session.tick(token);
    let scene = session.render();
    assert_eq!(scene.frame_index, 2);
    assert_eq!(scene.overlay.frame_text, "Frame 3 / 8");
    assert_eq!(scene.overlay.phase, Some(ShotPhase::Draw));
    assert!(scene.has_skeleton());
  }

  #[test]
  fn reload_while_playing_invalidates_old_timer() {
    let mut session = Session::default();
    session.load(result(10, &[], 50.0));
    let token = session.play().unwrap();
    session.tick(token);

    session.load(result(3, &["Inconsistent anchor point"], 40.0));
    assert_eq!(session.tick(token), TickOutcome::Stale);
    assert_eq!(session.playback_state(), PlaybackState::default());
    assert_eq!(session.render().total_frames, 3);
  }

  #[test]
  fn empty_sequence_renders_empty_scene() {
    let mut session = Session::default();
    session.load(result(0, &[], 10.0));
    assert_eq!(session.play(), None);
    let scene = session.render();
    assert!(!scene.has_skeleton());
    assert_eq!(scene.overlay.frame_text, "Frame 0 / 0");
  }

  #[test]
  fn discard_drops_analysis() {
    let mut session = Session::default();
    session.load(result(5, &[], 50.0));
    let token = session.play().unwrap();
    session.discard();
    assert!(session.analysis().is_none());
    assert_eq!(session.tick(token), TickOutcome::Stale);
    assert_eq!(session.render().total_frames, 0);
  }
}
