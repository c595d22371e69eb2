// 该文件是 Jianying （箭影） 项目的一部分。
// src/report.rs - 分析结果交换格式
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

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
  classify::{ErrorCategory, Severity},
  frame::PoseSequence,
  phase::PhaseRanges,
};

/// 带类别的错误条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedError {
  pub category: ErrorCategory,
  #[serde(default)]
  pub severity: Severity,
  pub message: String,
}

/// 错误条目：新格式带类别，旧格式为纯文本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "RawErrorEntry")]
pub enum ErrorEntry {
  Tagged(TaggedError),
  Text(String),
}

/// 类别或严重程度无法识别的条目只保留消息文本
#[derive(Deserialize)]
#[serde(untagged)]
enum RawErrorEntry {
  Tagged(TaggedError),
  Text(String),
  Unrecognized { message: String },
}

impl From<RawErrorEntry> for ErrorEntry {
  fn from(raw: RawErrorEntry) -> Self {
    match raw {
      RawErrorEntry::Tagged(tagged) => ErrorEntry::Tagged(tagged),
      RawErrorEntry::Text(text) => ErrorEntry::Text(text),
      RawErrorEntry::Unrecognized { message } => {
        warn!("无法识别的错误类别，按文本处理: {}", message);
        ErrorEntry::Text(message)
      }
    }
  }
}

impl ErrorEntry {
  pub fn message(&self) -> &str {
    match self {
      ErrorEntry::Tagged(tagged) => &tagged.message,
      ErrorEntry::Text(text) => text,
    }
  }
}

/// 单个阶段的分析结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseReport {
  #[serde(default)]
  pub errors: Vec<ErrorEntry>,
  #[serde(default)]
  pub metrics: BTreeMap<String, f64>,
}

/// 生物力学分析报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
  #[serde(default)]
  pub overall_score: f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phases: Option<PhaseRanges>,
  #[serde(default)]
  pub stance_analysis: PhaseReport,
  #[serde(default)]
  pub draw_analysis: PhaseReport,
  #[serde(default)]
  pub anchor_analysis: PhaseReport,
  #[serde(default)]
  pub release_analysis: PhaseReport,
  /// 汇总错误列表，通常与各阶段错误重复
  #[serde(default)]
  pub errors: Vec<ErrorEntry>,
  #[serde(default)]
  pub recommendations: Vec<String>,
}

/// 汇总后的错误与指标
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregatedReport {
  pub errors: Vec<ErrorEntry>,
  pub metrics: BTreeMap<String, f64>,
  pub overall_score: f64,
}

impl AnalysisReport {
  pub fn phase_reports(&self) -> [(&'static str, &PhaseReport); 4] {
    [
      ("stance", &self.stance_analysis),
      ("draw", &self.draw_analysis),
      ("anchor", &self.anchor_analysis),
      ("release", &self.release_analysis),
    ]
  }

  /// 合并四个阶段的错误与指标，去除重复错误
  pub fn aggregate(&self) -> AggregatedReport {
    let mut errors: Vec<ErrorEntry> = Vec::new();
    let mut metrics = BTreeMap::new();

    let phase_errors = self.phase_reports().into_iter().flat_map(|(_, r)| r.errors.iter());
    for entry in phase_errors.chain(self.errors.iter()) {
      if !errors.contains(entry) {
        errors.push(entry.clone());
      }
    }

    for (phase, report) in self.phase_reports() {
      for (name, value) in report.metrics.iter() {
        if metrics.insert(name.clone(), *value).is_some() {
          debug!("阶段 {} 的指标 {} 覆盖了先前的值", phase, name);
        }
      }
    }

    AggregatedReport {
      errors,
      metrics,
      overall_score: self.overall_score,
    }
  }
}

/// 远程分析服务给出的完整结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub total_frames: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub fps: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub duration: Option<f64>,
  #[serde(default)]
  pub pose_data: PoseSequence,
  #[serde(default)]
  pub analysis: AnalysisReport,
}

impl AnalysisResult {
  /// 解析分析结果，同时接受上传接口的 `{success, file_id, analysis}` 包装
  pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
    let mut value: Value = serde_json::from_str(text)?;
    let wrapped = value.get("file_id").is_some()
      && value
        .get("analysis")
        .is_some_and(|inner| inner.get("pose_data").is_some());
    if wrapped {
      debug!("检测到上传结果包装，解包 analysis 字段");
      value = value["analysis"].take();
    }
    serde_json::from_value(value)
  }
}
