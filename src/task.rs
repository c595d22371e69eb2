// 该文件是 Jianying （箭影） 项目的一部分。
// src/task.rs - 播放任务
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

use std::{
  sync::mpsc::{Receiver, TryRecvError},
  thread,
  time::{Duration, Instant},
};

use tracing::{info, warn};

use crate::{
  input::LoadAnalysis,
  output::Render,
  playback::{MIN_TICK_INTERVAL, TickOutcome},
  session::Session,
};

pub trait Task<I, O>: Sized {
  type Error;
  fn run_task(self, input: I, session: &mut Session, output: O) -> Result<(), Self::Error>;
}

fn load<I, IE>(input: &I, session: &mut Session) -> anyhow::Result<()>
where
  IE: std::error::Error + Sync + Send + 'static,
  I: LoadAnalysis<Error = IE>,
{
  let now = Instant::now();
  let result = input.load_analysis()?;
  session.load(result);
  info!("分析结果载入完成，耗时: {:.2?}", now.elapsed());
  Ok(())
}

/// 只合成并输出一帧
#[derive(Default, Debug)]
pub struct OneShotTask {
  frame: usize,
}

impl OneShotTask {
  pub fn at_frame(frame: usize) -> Self {
    Self { frame }
  }
}

impl<
  IE: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: LoadAnalysis<Error = IE>,
  O: Render<Error = RE>,
> Task<I, O> for OneShotTask
{
  type Error = anyhow::Error;

  fn run_task(self, input: I, session: &mut Session, output: O) -> Result<(), Self::Error> {
    info!("开始任务...");
    load(&input, session)?;
    session.seek(self.frame);
    let index = session.playback_state().current_frame_index;
    if index != self.frame {
      warn!("帧 {} 超出范围，改为输出第 {} 帧", self.frame, index);
    }
    let now = Instant::now();
    output.render_scene(&session.render())?;
    info!("渲染完成，耗时: {:.2?}", now.elapsed());
    Ok(())
  }
}

/// 连续播放，每个间隔前进一帧并输出
#[derive(Debug)]
pub struct ContinuousTask {
  frame_number: Option<usize>,
  tick_interval: Duration,
  start_frame: usize,
  interrupt: Option<Receiver<()>>,
}

impl Default for ContinuousTask {
  fn default() -> Self {
    Self {
      frame_number: None,
      tick_interval: MIN_TICK_INTERVAL,
      start_frame: 0,
      interrupt: None,
    }
  }
}

/// 注册 Ctrl-C 处理，返回中断信号通道
pub fn ctrlc_channel() -> Result<Receiver<()>, ctrlc::Error> {
  let (tx, rx) = std::sync::mpsc::channel();
  ctrlc::set_handler(move || {
    info!("收到中断信号，准备暂停...");
    let _ = tx.send(());
    thread::spawn(|| {
      thread::sleep(Duration::from_secs(30));
      warn!("强制退出程序");
      std::process::exit(1);
    });
  })?;
  Ok(rx)
}

impl ContinuousTask {
  pub fn with_frame_number(mut self, frame_number: Option<usize>) -> Self {
    self.frame_number = frame_number;
    self
  }

  pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
    self.tick_interval = tick_interval;
    self
  }

  pub fn with_start_frame(mut self, start_frame: usize) -> Self {
    self.start_frame = start_frame;
    self
  }

  pub fn with_interrupt(mut self, interrupt: Receiver<()>) -> Self {
    self.interrupt = Some(interrupt);
    self
  }

  fn interrupted(&self) -> bool {
    match &self.interrupt {
      Some(rx) => matches!(rx.try_recv(), Ok(()) | Err(TryRecvError::Disconnected)),
      None => false,
    }
  }
}

impl<
  IE: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: LoadAnalysis<Error = IE>,
  O: Render<Error = RE>,
> Task<I, O> for ContinuousTask
{
  type Error = anyhow::Error;

  fn run_task(self, input: I, session: &mut Session, output: O) -> Result<(), Self::Error> {
    info!("开始任务...");
    load(&input, session)?;
    session.seek(self.start_frame);

    if self.frame_number == Some(0) {
      info!("指定帧数为 0，不输出");
      return Ok(());
    }
    output.render_scene(&session.render())?;
    let mut rendered = 1;

    let Some(token) = session.play() else {
      warn!("序列为空，没有可播放的帧");
      return Ok(());
    };

    loop {
      if self.frame_number.is_some_and(|n| rendered >= n) {
        info!("达到指定帧数 {}, 退出播放", rendered);
        session.pause();
        break;
      }
      if self.interrupted() {
        warn!("中断信号接收，暂停播放");
        session.pause();
        break;
      }

      thread::sleep(self.tick_interval);
      let now = Instant::now();
      let previous = session.playback_state().current_frame_index;
      match session.tick(token) {
        TickOutcome::Advanced(index) => {
          output.render_scene(&session.render())?;
          info!("第 {} 帧输出完成，耗时: {:.2?}", index, now.elapsed());
        }
        TickOutcome::Finished(index) => {
          // 从最后一帧开始播放时不前进，该帧已输出过
          if index != previous {
            output.render_scene(&session.render())?;
          }
          info!("播放到最后一帧 {}", index);
          break;
        }
        TickOutcome::Stale => {
          warn!("定时器已失效，停止播放");
          break;
        }
      }
      rendered += 1;
    }

    info!("任务完成，退出");
    Ok(())
  }
}
