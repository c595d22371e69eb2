// 该文件是 Jianying （箭影） 项目的一部分。
// src/args.rs - 项目参数配置
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

use clap::Parser;
use url::Url;

/// Jianying 姿态回放参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 分析结果来源
  /// 支持格式:
  /// - 文件: file:///path/result.json
  /// - 结果目录: results:///path/results?id=<file_id>
  #[arg(long, value_name = "SOURCE")]
  pub input: Url,

  /// 场景输出
  /// 支持格式:
  /// - 标准输出: stdout: 或 stdout:?annotations
  /// - JSON Lines: jsonl:///path/scenes.jsonl
  /// - 目录记录: folder:///path/records?always
  #[arg(long, value_name = "OUTPUT", default_value = "stdout:")]
  pub output: Url,

  /// TOML 配置文件
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// 起始帧
  #[arg(long, default_value = "0", value_name = "INDEX")]
  pub start: usize,

  /// 最多输出的帧数
  #[arg(long, value_name = "FRAME_NUMBER")]
  pub frame_number: Option<usize>,
}
