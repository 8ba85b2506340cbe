// 该文件是 Baize （白泽） 项目的一部分。
// src/model/classifier.rs - 量化分类模型
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

use tracing::{debug, error, info};

use crate::{
  error::ClassifyError,
  frame::RgbNhwcFrame,
  input::AsNhwcFrame,
  labels::Labels,
  model::{Category, ClassifyResult, Interpreter, Model},
  postprocess::ScoreRanker,
  tensor::ElementType,
};

const CLASSIFIER_INPUT_INDEX: usize = 0;
const CLASSIFIER_OUTPUT_INDEX: usize = 0;

/// 在任意推理引擎之上完成输入校验、推理与结果排序
pub struct Classifier<const W: u32, const H: u32, E> {
  engine: E,
  ranker: ScoreRanker,
  labels: Option<Labels>,
}

impl<const W: u32, const H: u32, E: Interpreter> Classifier<W, H, E> {
  /// 分配张量并校验输入张量为 `[1, H, W, 3]` 的 u8 张量
  pub fn new(mut engine: E, ranker: ScoreRanker) -> Result<Self, ClassifyError> {
    info!("分配张量");
    engine.allocate_tensors().inspect_err(|e| error!("{}", e))?;

    let input = engine.input_tensor(CLASSIFIER_INPUT_INDEX)?;
    debug!("模型输入: {:?} {}", input.dims, input.element_type);

    let expected = RgbNhwcFrame::<W, H>::tensor_dims();
    if input.dims != expected {
      error!("预期输入形状为 {:?}, 实际为 {:?}", expected, input.dims);
      return Err(ClassifyError::InputShapeMismatch {
        expected,
        actual: input.dims,
      });
    }

    if input.element_type != ElementType::UInt8 {
      error!("预期输入类型为 uint8, 实际为 {}", input.element_type);
      return Err(ClassifyError::InputTypeMismatch {
        expected: ElementType::UInt8,
        actual: input.element_type,
      });
    }

    Ok(Self {
      engine,
      ranker,
      labels: None,
    })
  }

  pub fn with_labels(mut self, labels: Option<Labels>) -> Self {
    self.labels = labels;
    self
  }

  pub fn engine(&self) -> &E {
    &self.engine
  }

  fn label_of(&self, class_index: usize) -> Option<String> {
    self
      .labels
      .as_ref()
      .and_then(|labels| labels.get(class_index))
      .map(str::to_string)
  }
}

impl<const W: u32, const H: u32, E: Interpreter> Model for Classifier<W, H, E> {
  type Input = RgbNhwcFrame<W, H>;
  type Output = ClassifyResult;
  type Error = ClassifyError;

  fn infer(&mut self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
    debug!("设置模型输入");
    self
      .engine
      .set_input(CLASSIFIER_INPUT_INDEX, input.as_nhwc())?;

    debug!("执行模型推理");
    self.engine.invoke().inspect_err(|e| error!("{}", e))?;

    debug!("获取模型输出");
    let output = self.engine.output_tensor(CLASSIFIER_OUTPUT_INDEX)?;
    if output.info.element_type != ElementType::UInt8 {
      error!("预期输出类型为 uint8, 实际为 {}", output.info.element_type);
      return Err(ClassifyError::OutputTypeMismatch {
        expected: ElementType::UInt8,
        actual: output.info.element_type,
      });
    }

    let ranked = self.ranker.rank(&output).inspect_err(|e| error!("{}", e))?;
    let categories = ranked
      .into_iter()
      .map(|s| Category {
        class_index: s.class_index,
        score: s.score,
        label: self.label_of(s.class_index),
      })
      .collect::<Vec<_>>();
    debug!("分类结果: {:?}", categories);

    Ok(ClassifyResult {
      categories: categories.into_boxed_slice(),
    })
  }
}
