// 该文件是 Baize （白泽） 项目的一部分。
// src/config.rs - 运行配置
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

use crate::postprocess::{DequantizePolicy, ScoreRanker};

pub const DEFAULT_MODEL_PATH: &str =
  "/usr/share/tensorflow-lite/examples/mobilenet_v1_1.0_224_quant.tflite";
pub const DEFAULT_IMAGE_PATH: &str = "/usr/share/tensorflow-lite/examples/grace_hopper.bmp";
pub const DEFAULT_LABEL_PATH: &str = "/usr/share/tensorflow-lite/examples/labels.txt";

/// MobileNet v1 输入尺寸
pub const INPUT_WIDTH: u32 = 224;
pub const INPUT_HEIGHT: u32 = 224;

/// MobileNet v1 输出层的类别数（含背景类）
pub const DEFAULT_CLASS_COUNT: usize = 1001;
pub const DEFAULT_TOP_K: usize = 5;

/// 分类流程配置
#[derive(Debug, Clone)]
pub struct Config {
  pub model_path: PathBuf,
  pub image_path: PathBuf,
  pub label_path: PathBuf,
  pub top_k: usize,
  pub class_count: usize,
  pub policy: DequantizePolicy,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      model_path: PathBuf::from(DEFAULT_MODEL_PATH),
      image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
      label_path: PathBuf::from(DEFAULT_LABEL_PATH),
      top_k: DEFAULT_TOP_K,
      class_count: DEFAULT_CLASS_COUNT,
      policy: DequantizePolicy::Raw,
    }
  }
}

impl Config {
  pub fn ranker(&self) -> ScoreRanker {
    ScoreRanker::new(self.class_count)
      .top_k(self.top_k)
      .policy(self.policy)
  }
}
