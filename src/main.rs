// 该文件是 Jianying （箭影） 项目的一部分。
// src/main.rs - 播放器主程序
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

mod args;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use jianying::{
  FromUrl,
  config::Config,
  input::InputWrapper,
  output::OutputWrapper,
  scene::SceneComposer,
  session::Session,
  task::{ContinuousTask, Task, ctrlc_channel},
};

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = args::Args::parse();

  info!("分析结果来源: {}", args.input);
  info!("场景输出: {}", args.output);

  let config = Config::load_or_default(args.config.as_ref())?;
  let input = InputWrapper::from_url(&args.input)?;
  let output = OutputWrapper::from_url(&args.output)?;
  let mut session = Session::new(SceneComposer::from_config(&config));

  ContinuousTask::default()
    .with_tick_interval(config.playback.tick_interval())
    .with_start_frame(args.start)
    .with_frame_number(args.frame_number)
    .with_interrupt(ctrlc_channel()?)
    .run_task(input, &mut session, output)?;

  let state = session.playback_state();
  info!(
    "停在第 {} 帧，播放中: {}",
    state.current_frame_index, state.is_playing
  );

  Ok(())
}
