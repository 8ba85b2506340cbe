// 该文件是 Baize （白泽） 项目的一部分。
// src/postprocess.rs - 反量化与 Top-K 排序
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

use tracing::{debug, warn};

use crate::{
  error::ClassifyError,
  tensor::{QuantizationParams, QuantizedOutput},
};

/// 调整策略使用的固定缩放系数
pub const ADJUSTED_SCALE: f32 = 1.0 / 255.0;

/// 单个类别的量化输出
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizedScore {
  pub class_index: usize,
  pub raw_value: u8,
}

/// 单个类别反量化后的分数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedScore {
  pub class_index: usize,
  pub score: f32,
}

impl RankedScore {
  pub fn new(class_index: usize, score: f32) -> Self {
    Self { class_index, score }
  }
}

/// 反量化公式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DequantizePolicy {
  /// `scale * (raw - zero_point)`，参数取自张量
  #[default]
  Raw,
  /// 原始值减一，缩放固定为 1/255，与 label_image 参考输出对齐
  Adjusted,
}

impl DequantizePolicy {
  pub fn dequantize(self, raw_value: u8, params: QuantizationParams) -> f32 {
    match self {
      DequantizePolicy::Raw => dequantize(raw_value, params.scale, params.zero_point),
      DequantizePolicy::Adjusted => {
        dequantize(raw_value.saturating_sub(1), ADJUSTED_SCALE, params.zero_point)
      }
    }
  }
}

/// `scale * (raw_value - zero_point)`，不做截断，低于零点的值得到负分
pub fn dequantize(raw_value: u8, scale: f32, zero_point: i32) -> f32 {
  scale * (i32::from(raw_value) - zero_point) as f32
}

/// 按分数降序返回前 `k` 项
///
/// 使用稳定排序，分数相同时保留输入顺序。`k` 大于输入长度时截断为输入长度。
pub fn rank_top_k(scores: &[RankedScore], k: usize) -> Vec<RankedScore> {
  let mut ranked = scores.to_vec();
  ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
  ranked.truncate(k);
  ranked
}

/// 将模型的量化输出转换为排好序的类别列表
#[derive(Debug, Clone)]
pub struct ScoreRanker {
  policy: DequantizePolicy,
  top_k: usize,
  class_count: usize,
}

impl ScoreRanker {
  pub fn new(class_count: usize) -> Self {
    Self {
      policy: DequantizePolicy::default(),
      top_k: 5,
      class_count,
    }
  }

  pub fn policy(mut self, policy: DequantizePolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn top_k(mut self, top_k: usize) -> Self {
    self.top_k = top_k;
    self
  }

  pub fn class_count(&self) -> usize {
    self.class_count
  }

  /// 反量化全部类别
  pub fn dequantize_all(
    &self,
    raw: impl IntoIterator<Item = QuantizedScore>,
    params: QuantizationParams,
  ) -> Vec<RankedScore> {
    raw
      .into_iter()
      .map(|q| RankedScore::new(q.class_index, self.policy.dequantize(q.raw_value, params)))
      .collect()
  }

  pub fn rank(&self, output: &QuantizedOutput) -> Result<Vec<RankedScore>, ClassifyError> {
    let values = output.class_scores(self.class_count)?;
    let params = output.params.unwrap_or_else(|| {
      warn!("输出张量缺少量化参数，按原值解释");
      QuantizationParams::default()
    });
    debug!(
      "反量化参数: scale={}, zero_point={}, 策略={:?}",
      params.scale, params.zero_point, self.policy
    );

    let scores = self.dequantize_all(
      values
        .iter()
        .enumerate()
        .map(|(class_index, &raw_value)| QuantizedScore {
          class_index,
          raw_value,
        }),
      params,
    );

    Ok(rank_top_k(&scores, self.top_k))
  }
}
