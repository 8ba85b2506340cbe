// 该文件是 Baize （白泽） 项目的一部分。
// src/model/tflite.rs - 基于 tract 的 TFLite 推理引擎
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

use tracing::{debug, error, info};
use tract_core::internal::DimLike;
use tract_core::prelude::*;

use crate::{
  error::ClassifyError,
  model::Interpreter,
  tensor::{ElementType, QuantizationParams, QuantizedOutput, TensorInfo},
};

pub struct TfliteBuilder {
  model_path: PathBuf,
}

impl TfliteBuilder {
  pub fn new(model_path: impl Into<PathBuf>) -> Self {
    Self {
      model_path: model_path.into(),
    }
  }

  pub fn build(self) -> Result<TfliteInterpreter, ClassifyError> {
    info!("加载模型文件: {}", self.model_path.display());
    let model = tract_tflite::tflite()
      .model_for_path(&self.model_path)
      .map_err(|e| {
        error!("模型加载失败: {:#}", e);
        ClassifyError::ModelLoadFailure(format!("{}: {:#}", self.model_path.display(), e))
      })?;
    debug!("模型节点数量: {}", model.nodes().len());

    TfliteInterpreter::from_model(model)
  }
}

fn build_failure(e: TractError) -> ClassifyError {
  error!("解释器构建失败: {:#}", e);
  ClassifyError::InterpreterBuildFailure(format!("{:#}", e))
}

fn element_type(dt: DatumType) -> ElementType {
  match dt.unquantized() {
    DatumType::U8 => ElementType::UInt8,
    DatumType::I8 => ElementType::Int8,
    DatumType::F32 => ElementType::Float32,
    other => ElementType::Other(format!("{:?}", other).to_lowercase()),
  }
}

// 符号维度记为 0，由调用方的形状校验拒绝
fn fact_info(fact: &TypedFact) -> TensorInfo {
  let dims = fact
    .shape
    .iter()
    .map(|d| d.to_usize().unwrap_or(0))
    .collect::<Vec<_>>();
  TensorInfo::new(dims, element_type(fact.datum_type))
}

pub struct TfliteInterpreter {
  plan: TypedRunnableModel<TypedModel>,
  inputs: Vec<TensorInfo>,
  input_facts: Vec<TypedFact>,
  input: Option<TValue>,
  outputs: Option<TVec<TValue>>,
}

impl TfliteInterpreter {
  /// 由已解析的模型构建解释器
  pub fn from_model(model: TypedModel) -> Result<Self, ClassifyError> {
    info!("构建解释器");
    let model = model.into_optimized().map_err(build_failure)?;

    let input_facts = (0..model.inputs.len())
      .map(|i| model.input_fact(i).cloned())
      .collect::<TractResult<Vec<_>>>()
      .map_err(build_failure)?;
    let inputs = input_facts.iter().map(fact_info).collect::<Vec<_>>();
    debug!("模型输入数量: {}", inputs.len());
    debug!("模型输出数量: {}", model.outputs.len());

    let plan = model.into_runnable().map_err(build_failure)?;
    info!("模型加载完成");

    Ok(Self {
      plan,
      inputs,
      input_facts,
      input: None,
      outputs: None,
    })
  }

  fn allocate_input(fact: &TypedFact) -> TractResult<Tensor> {
    let shape = fact
      .shape
      .as_concrete()
      .ok_or_else(|| anyhow::anyhow!("输入形状包含符号维度: {:?}", fact.shape))?;
    let dt = fact.datum_type;
    let tensor = Tensor::zero_dt(dt.unquantized(), shape)?;
    if dt.is_quantized() {
      Ok(tensor.cast_to_dt(dt)?.into_owned())
    } else {
      Ok(tensor)
    }
  }

  fn copy_input(tensor: &mut Tensor, data: &[u8]) -> Result<(), ClassifyError> {
    let dims = tensor.shape().to_vec();
    let slice = tensor
      .as_slice_mut::<u8>()
      .map_err(|e| ClassifyError::InferenceFailure(format!("{:#}", e)))?;
    if slice.len() != data.len() {
      error!("输入数据长度 {} 与张量长度 {} 不一致", data.len(), slice.len());
      return Err(ClassifyError::InputShapeMismatch {
        expected: dims,
        actual: vec![data.len()],
      });
    }
    slice.copy_from_slice(data);
    Ok(())
  }
}

impl Interpreter for TfliteInterpreter {
  fn allocate_tensors(&mut self) -> Result<(), ClassifyError> {
    let fact = self
      .input_facts
      .first()
      .ok_or_else(|| ClassifyError::TensorAllocationFailure("模型没有输入".to_string()))?;
    let tensor = Self::allocate_input(fact)
      .map_err(|e| ClassifyError::TensorAllocationFailure(format!("{:#}", e)))?;
    debug!("输入张量已分配: {:?}", tensor.shape());
    self.input = Some(tensor.into_tvalue());
    Ok(())
  }

  fn input_tensor(&self, index: usize) -> Result<TensorInfo, ClassifyError> {
    self.inputs.get(index).cloned().ok_or_else(|| {
      ClassifyError::TensorAllocationFailure(format!("输入张量 {} 不存在", index))
    })
  }

  fn set_input(&mut self, index: usize, data: &[u8]) -> Result<(), ClassifyError> {
    if index != 0 {
      return Err(ClassifyError::TensorAllocationFailure(format!(
        "输入张量 {} 不存在",
        index
      )));
    }
    let mut tensor = self
      .input
      .take()
      .ok_or_else(|| ClassifyError::TensorAllocationFailure("输入张量尚未分配".to_string()))?
      .into_tensor();
    let result = Self::copy_input(&mut tensor, data);
    self.input = Some(tensor.into_tvalue());
    result
  }

  fn invoke(&mut self) -> Result<(), ClassifyError> {
    // TValue 为引用计数，克隆不复制张量数据
    let input = self
      .input
      .clone()
      .ok_or_else(|| ClassifyError::TensorAllocationFailure("输入张量尚未分配".to_string()))?;
    let outputs = self
      .plan
      .run(tvec!(input))
      .map_err(|e| ClassifyError::InferenceFailure(format!("{:#}", e)))?;
    debug!("模型输出数量: {}", outputs.len());
    self.outputs = Some(outputs);
    Ok(())
  }

  fn output_tensor(&self, index: usize) -> Result<QuantizedOutput, ClassifyError> {
    let value = self
      .outputs
      .as_ref()
      .and_then(|outputs| outputs.get(index))
      .ok_or_else(|| ClassifyError::InferenceFailure(format!("输出张量 {} 不存在", index)))?;

    let dt = value.datum_type();
    let info = TensorInfo::new(value.shape().to_vec(), element_type(dt));
    let params = dt.is_quantized().then(|| {
      let (zero_point, scale) = dt.zp_scale();
      QuantizationParams::new(scale, zero_point)
    });
    debug!("输出张量: {:?} {} {:?}", info.dims, info.element_type, params);

    // 仅 u8 输出会被排序，其余类型只带描述
    let data = if info.element_type == ElementType::UInt8 {
      value
        .as_slice::<u8>()
        .map_err(|e| ClassifyError::InferenceFailure(format!("{:#}", e)))?
        .to_vec()
    } else {
      Vec::new()
    };

    Ok(QuantizedOutput::new(info, data, params))
  }
}
