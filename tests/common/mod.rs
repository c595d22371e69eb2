// 该文件是 Jianying （箭影） 项目的一部分。
// tests/common/mod.rs - 集成测试公共数据
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

#![allow(dead_code)]

use serde_json::{Value, json};

/// 站立拉弓姿态的 33 个关键点
pub fn standing_landmarks() -> Value {
  let mut points = vec![(0.5_f32, 0.5_f32); 33];
  points[0] = (0.5, 0.15);
  points[11] = (0.4, 0.3);
  points[12] = (0.6, 0.3);
  points[13] = (0.3, 0.3);
  points[14] = (0.7, 0.3);
  points[15] = (0.2, 0.3);
  points[16] = (0.55, 0.2);
  points[23] = (0.45, 0.6);
  points[24] = (0.55, 0.6);
  points[25] = (0.45, 0.75);
  points[26] = (0.55, 0.75);
  points[27] = (0.4, 0.9);
  points[28] = (0.6, 0.9);
  Value::Array(
    points
      .into_iter()
      .map(|(x, y)| json!({"x": x, "y": y, "z": 0.0, "visibility": 0.9}))
      .collect(),
  )
}

pub fn frames(count: usize) -> Value {
  Value::Array(
    (0..count)
      .map(|i| {
        json!({
          "frame": i,
          "timestamp": i as f64 / 30.0,
          "pose_landmarks": standing_landmarks(),
        })
      })
      .collect(),
  )
}

/// 分析服务返回的结果 JSON
pub fn analysis_json(count: usize, stance_errors: Value, score: f64) -> String {
  json!({
    "total_frames": count,
    "fps": 30.0,
    "duration": count as f64 / 30.0,
    "pose_data": frames(count),
    "analysis": {
      "overall_score": score,
      "stance_analysis": {"errors": stance_errors, "metrics": {"foot_distance": 0.12}},
      "draw_analysis": {"errors": [], "metrics": {"draw_smoothness": 62.0}},
      "anchor_analysis": {"errors": [], "metrics": {}},
      "release_analysis": {"errors": [], "metrics": {}},
      "recommendations": ["Practice stance width drills"]
    }
  })
  .to_string()
}

pub fn scratch_dir(name: &str) -> std::path::PathBuf {
  let dir = std::env::temp_dir().join(format!("jianying-it-{}-{}", name, std::process::id()));
  let _ = std::fs::remove_dir_all(&dir);
  std::fs::create_dir_all(&dir).unwrap();
  dir
}
