// 该文件是 Baize （白泽） 项目的一部分。
// src/bin/benchmark_repeatshot.rs - 重复推理性能测试
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

#[path = "../args.rs"]
mod args;

use std::process;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use baize::{
  ClassifyError, FromUrl,
  config::{INPUT_HEIGHT, INPUT_WIDTH},
  error::exit_code,
  input::ImageFileInput,
  labels::Labels,
  model::{Classifier, TfliteBuilder},
  output::OutputWrapper,
  task::{RepeatShotTask, Task},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct BenchArgs {
  #[command(flatten)]
  pub common: args::Args,

  /// 重复推理次数
  #[arg(long, default_value_t = 100, value_name = "COUNT")]
  pub repeat: usize,
}

fn main() {
  tracing_subscriber::fmt::init();

  if let Err(e) = run() {
    error!("运行失败: {:#}", e);
    process::exit(exit_code(&e));
  }
}

fn run() -> Result<()> {
  let args = BenchArgs::parse();
  let config = args.common.config();

  info!("模型文件路径: {}", config.model_path.display());
  info!("输入图像: {}", config.image_path.display());
  info!("重复次数: {}", args.repeat);

  let output = OutputWrapper::from_url(&args.common.output)?;

  let engine = TfliteBuilder::new(&config.model_path).build()?;
  let model = Classifier::<INPUT_WIDTH, INPUT_HEIGHT, _>::new(engine, config.ranker())?
    .with_labels(Labels::load_or_warn(&config.label_path));

  let input = ImageFileInput::<INPUT_WIDTH, INPUT_HEIGHT>::open(&config.image_path)
    .map_err(ClassifyError::from)?;

  RepeatShotTask::new(args.repeat).run_task(input.into_nhwc(), model, output)?;

  Ok(())
}
