// 该文件是 Baize （白泽） 项目的一部分。
// src/model/interpreter.rs - 推理引擎接口
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

use crate::{
  error::ClassifyError,
  tensor::{QuantizedOutput, TensorInfo},
};

/// 外部推理引擎所需提供的操作
///
/// 调用顺序为 `allocate_tensors` → `input_tensor` → `set_input` → `invoke` →
/// `output_tensor`。
pub trait Interpreter {
  fn allocate_tensors(&mut self) -> Result<(), ClassifyError>;

  fn input_tensor(&self, index: usize) -> Result<TensorInfo, ClassifyError>;

  /// 将字节拷贝进输入张量，长度必须与张量一致
  fn set_input(&mut self, index: usize, data: &[u8]) -> Result<(), ClassifyError>;

  fn invoke(&mut self) -> Result<(), ClassifyError>;

  /// 最近一次 `invoke` 的输出
  fn output_tensor(&self, index: usize) -> Result<QuantizedOutput, ClassifyError>;
}
