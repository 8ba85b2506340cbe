// 该文件是 Baize （白泽） 项目的一部分。
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

use baize::{
  Config,
  config::{
    DEFAULT_CLASS_COUNT, DEFAULT_IMAGE_PATH, DEFAULT_LABEL_PATH, DEFAULT_MODEL_PATH, DEFAULT_TOP_K,
  },
  postprocess::DequantizePolicy,
};
use clap::Parser;
use url::Url;

/// Baize 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// TFLite 量化模型文件路径
  #[arg(long, value_name = "FILE", default_value = DEFAULT_MODEL_PATH)]
  pub model: PathBuf,

  /// 输入图像路径
  #[arg(long, value_name = "FILE", default_value = DEFAULT_IMAGE_PATH)]
  pub image: PathBuf,

  /// 类别标签文件路径，每行一个标签
  #[arg(long, value_name = "FILE", default_value = DEFAULT_LABEL_PATH)]
  pub labels: PathBuf,

  /// 输出排名前几的类别
  #[arg(long, default_value_t = DEFAULT_TOP_K, value_name = "K")]
  pub top_k: usize,

  /// 模型输出层类别数
  #[arg(long, default_value_t = DEFAULT_CLASS_COUNT, value_name = "COUNT")]
  pub class_count: usize,

  /// 反量化策略
  #[arg(long, value_enum, default_value_t = DequantizePolicy::Raw)]
  pub policy: DequantizePolicy,

  /// 输出方式
  /// 支持格式:
  /// - 控制台: stdout:
  /// - JSON 报告: json:///path/to/report.json
  #[arg(long, default_value = "stdout:", value_name = "OUTPUT")]
  pub output: Url,
}

impl Args {
  pub fn config(&self) -> Config {
    Config {
      model_path: self.model.clone(),
      image_path: self.image.clone(),
      label_path: self.labels.clone(),
      top_k: self.top_k,
      class_count: self.class_count,
      policy: self.policy,
    }
  }
}
