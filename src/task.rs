// 该文件是 Baize （白泽） 项目的一部分。
// src/task.rs - 推理任务
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

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::{model::Model, output::Render};

pub trait Task<I, M, O>: Sized {
  type Error;
  fn run_task(self, input: I, model: M, output: O) -> Result<(), Self::Error>;
}

/// 单帧单次推理
pub struct OneShotTask;

impl<
  F,
  D,
  ME: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: Iterator<Item = F>,
  M: Model<Input = F, Output = D, Error = ME>,
  O: Render<F, D, Error = RE>,
> Task<I, M, O> for OneShotTask
{
  type Error = anyhow::Error;

  fn run_task(self, mut input: I, mut model: M, output: O) -> Result<(), Self::Error> {
    info!("开始任务...");
    let frame = input.next().ok_or_else(|| anyhow::anyhow!("没有输入帧"))?;
    info!("输入帧获取成功，开始推理...");
    let now = Instant::now();
    let result = model.infer(&frame)?;
    info!("推理完成，耗时: {:.2?}", now.elapsed());
    output.render_result(&frame, &result)?;

    Ok(())
  }
}

/// 对同一帧重复推理并统计平均耗时
#[derive(Debug)]
pub struct RepeatShotTask {
  repeat_times: usize,
}

impl RepeatShotTask {
  /// 前两次推理作为预热，不计入平均值
  pub const WARMUP_TIMES: usize = 2;

  pub fn new(repeat_times: usize) -> Self {
    Self { repeat_times }
  }
}

impl Default for RepeatShotTask {
  fn default() -> Self {
    Self::new(100)
  }
}

/// 跳过预热后的平均耗时，样本不足时返回 `None`
pub fn average_after_warmup(times: &[Duration]) -> Option<Duration> {
  let measured = times.get(RepeatShotTask::WARMUP_TIMES..)?;
  if measured.is_empty() {
    return None;
  }
  Some(measured.iter().sum::<Duration>() / measured.len() as u32)
}

impl<
  F,
  D,
  ME: std::error::Error + Sync + Send + 'static,
  RE: std::error::Error + Sync + Send + 'static,
  I: Iterator<Item = F>,
  M: Model<Input = F, Output = D, Error = ME>,
  O: Render<F, D, Error = RE>,
> Task<I, M, O> for RepeatShotTask
{
  type Error = anyhow::Error;

  fn run_task(self, mut input: I, mut model: M, output: O) -> Result<(), Self::Error> {
    info!("开始任务...");
    let frame = input.next().ok_or_else(|| anyhow::anyhow!("没有输入帧"))?;
    info!("输入帧获取成功，开始推理...");

    let mut times = Vec::with_capacity(self.repeat_times);
    let mut last = None;
    for i in 0..self.repeat_times {
      let now = Instant::now();
      let result = model.infer(&frame)?;
      let elapsed = now.elapsed();
      info!("({})推理完成，耗时: {:.2?}", i, elapsed);
      times.push(elapsed);
      last = Some(result);
    }

    match average_after_warmup(&times) {
      Some(avg) => warn!("平均推理时间: {:.2?}", avg),
      None => warn!("推理次数不足 {}，无法统计平均时间", RepeatShotTask::WARMUP_TIMES + 1),
    }

    if let Some(result) = last {
      output.render_result(&frame, &result)?;
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn average_skips_warmup() {
    let times = [100, 50, 10, 20, 30].map(Duration::from_millis);
    assert_eq!(average_after_warmup(&times), Some(Duration::from_millis(20)));
  }

  #[test]
  fn average_needs_samples_after_warmup() {
    assert_eq!(average_after_warmup(&[]), None);
    assert_eq!(average_after_warmup(&[Duration::from_millis(1); 2]), None);
  }
}
