// 该文件是 Jianying （箭影） 项目的一部分。
// src/bin/render_frame.rs - 单帧场景导出
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

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use url::Url;

use jianying::{
  FromUrl,
  config::Config,
  input::InputWrapper,
  output::OutputWrapper,
  scene::SceneComposer,
  session::Session,
  task::{OneShotTask, Task},
};
use tracing::info;

/// 导出单帧场景描述
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 分析结果来源
  #[arg(long, value_name = "SOURCE")]
  pub input: Url,
  /// 场景输出
  #[arg(long, value_name = "OUTPUT", default_value = "stdout:?annotations")]
  pub output: Url,
  /// 帧索引，超出范围时取最后一帧
  #[arg(long, default_value = "0", value_name = "INDEX")]
  pub frame: usize,
  /// TOML 配置文件
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("分析结果来源: {}", args.input);
  info!("场景输出: {}", args.output);
  info!("帧索引: {}", args.frame);

  let config = Config::load_or_default(args.config.as_ref())?;
  let input = InputWrapper::from_url(&args.input)?;
  let output = OutputWrapper::from_url(&args.output)?;
  let mut session = Session::new(SceneComposer::from_config(&config));

  OneShotTask::at_frame(args.frame).run_task(input, &mut session, output)?;

  Ok(())
}
