// 该文件是 Jianying （箭影） 项目的一部分。
// src/playback.rs - 播放控制状态机
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

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};

pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(100);
pub const MAX_TICK_INTERVAL: Duration = Duration::from_millis(120);

/// 定时器令牌，只有当前有效的令牌能推进帧
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
  generation: u64,
}

/// 一次 tick 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
  /// 前进到新帧，仍在播放
  Advanced(usize),
  /// 到达最后一帧，播放停止
  Finished(usize),
  /// 令牌已失效，状态未变
  Stale,
}

/// 对外可见的播放状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
  pub current_frame_index: usize,
  pub is_playing: bool,
}

#[derive(Debug, Default)]
pub struct PlaybackController {
  state: PlaybackState,
  len: usize,
  generation: u64,
  active: Option<TimerToken>,
}

impl PlaybackController {
  pub fn new(len: usize) -> Self {
    Self {
      len,
      ..Default::default()
    }
  }

  pub fn state(&self) -> PlaybackState {
    self.state
  }

  pub fn current_frame_index(&self) -> usize {
    self.state.current_frame_index
  }

  pub fn is_playing(&self) -> bool {
    self.state.is_playing
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  fn last_index(&self) -> usize {
    self.len.saturating_sub(1)
  }

  fn cancel_timer(&mut self) {
    if let Some(token) = self.active.take() {
      debug!("取消定时器 #{}", token.generation);
    }
    self.state.is_playing = false;
  }

  /// 开始播放；已在播放或序列为空时返回 None
  pub fn play(&mut self) -> Option<TimerToken> {
    if self.state.is_playing || self.len == 0 {
      return None;
    }
    self.generation += 1;
    let token = TimerToken {
      generation: self.generation,
    };
    self.active = Some(token);
    self.state.is_playing = true;
    info!("开始播放，起始帧 {}", self.state.current_frame_index);
    Some(token)
  }

  pub fn pause(&mut self) {
    if self.state.is_playing {
      info!("暂停于第 {} 帧", self.state.current_frame_index);
    }
    self.cancel_timer();
  }

  pub fn reset(&mut self) {
    self.cancel_timer();
    self.state.current_frame_index = 0;
  }

  /// 跳转到指定帧，越界时截断，不改变播放状态
  pub fn seek(&mut self, index: usize) {
    self.state.current_frame_index = index.min(self.last_index());
  }

  /// 载入新序列，旧定时器全部失效
  pub fn load(&mut self, len: usize) {
    self.cancel_timer();
    self.len = len;
    self.state.current_frame_index = 0;
    debug!("载入序列，共 {} 帧", len);
  }

  pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
    if self.active != Some(token) {
      return TickOutcome::Stale;
    }

    let last = self.last_index();
    if self.state.current_frame_index < last {
      self.state.current_frame_index += 1;
    }

    let index = self.state.current_frame_index;
    if index >= last {
      self.cancel_timer();
      info!("播放结束于第 {} 帧", index);
      TickOutcome::Finished(index)
    } else {
      TickOutcome::Advanced(index)
    }
  }
}
