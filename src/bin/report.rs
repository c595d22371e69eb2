// 该文件是 Jianying （箭影） 项目的一部分。
// src/bin/report.rs - 分析报告查看
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

use anyhow::Result;
use clap::Parser;
use url::Url;

use jianying::{
  FromUrl,
  classify::ErrorCategory,
  input::{InputWrapper, LoadAnalysis},
  report::AnalysisResult,
  session::LoadedAnalysis,
};
use tracing::info;

/// 查看分析报告摘要
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 分析结果来源
  #[arg(long, value_name = "SOURCE")]
  pub input: Url,
  /// 以 JSON 输出汇总结果
  #[arg(long)]
  pub json: bool,
}

fn print_video_info(result: &AnalysisResult) {
  println!("视频信息");
  println!("========");
  println!("姿态帧数: {}", result.pose_data.len());
  if let Some(total) = result.total_frames {
    println!("视频总帧数: {}", total);
  }
  if let Some(fps) = result.fps {
    println!("帧率: {:.2}", fps);
  }
  if let Some(duration) = result.duration {
    println!("时长: {:.2} 秒", duration);
  }
  println!();
}

fn print_analysis(loaded: &LoadedAnalysis) {
  println!(
    "总分: {:.0}/100  {} {}",
    loaded.report.overall_score.floor(),
    loaded.skill.icon,
    loaded.skill.label
  );
  println!();

  println!("错误 ({})", loaded.report.errors.len());
  for entry in &loaded.report.errors {
    println!("  - {}", entry.message());
  }
  let active: Vec<String> = ErrorCategory::ALL
    .iter()
    .filter_map(|category| {
      loaded
        .active
        .severity(*category)
        .map(|severity| format!("{:?}({:?})", category, severity))
    })
    .collect();
  let active = if active.is_empty() {
    "-".to_string()
  } else {
    active.join(", ")
  };
  println!("激活类别: {}", active);
  println!();

  println!("指标");
  for (name, value) in &loaded.report.metrics {
    println!("  {:<24} {:.3}", name, value);
  }
  println!();

  println!("阶段");
  for (phase, range) in loaded.phases.iter() {
    println!("  {:<8} {:>5} - {:<5}", phase, range.start, range.end);
  }
  println!();

  println!("建议");
  for (i, recommendation) in loaded.recommendations.iter().enumerate() {
    println!("  {}. {}", i + 1, recommendation);
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt::init();

  let args = Args::parse();
  info!("分析结果来源: {}", args.input);

  let input = InputWrapper::from_url(&args.input)?;
  let result = input.load_analysis()?;

  if args.json {
    let loaded = LoadedAnalysis::new(result);
    let summary = serde_json::json!({
      "report": loaded.report,
      "skill": loaded.skill,
      "phases": loaded.phases,
      "recommendations": loaded.recommendations,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    return Ok(());
  }

  print_video_info(&result);
  print_analysis(&LoadedAnalysis::new(result));

  Ok(())
}
