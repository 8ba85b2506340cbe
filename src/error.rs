// 该文件是 Baize （白泽） 项目的一部分。
// src/error.rs - 分类流程错误定义
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

use thiserror::Error;

use crate::tensor::ElementType;

/// 分类流程中任一步骤失败时返回的错误
///
/// 每个变体对应流程中的一次外部调用，发生即终止，不做重试。
#[derive(Error, Debug)]
pub enum ClassifyError {
  #[error("模型加载失败: {0}")]
  ModelLoadFailure(String),
  #[error("解释器构建失败: {0}")]
  InterpreterBuildFailure(String),
  #[error("张量分配失败: {0}")]
  TensorAllocationFailure(String),
  #[error("输入张量形状不匹配: 期望 {expected:?}, 实际 {actual:?}")]
  InputShapeMismatch {
    expected: Vec<usize>,
    actual: Vec<usize>,
  },
  #[error("输入张量类型不匹配: 期望 {expected}, 实际 {actual}")]
  InputTypeMismatch {
    expected: ElementType,
    actual: ElementType,
  },
  #[error("图像加载失败: {0}")]
  ImageLoadFailure(String),
  #[error("推理执行失败: {0}")]
  InferenceFailure(String),
  #[error("输出张量类型不匹配: 期望 {expected}, 实际 {actual}")]
  OutputTypeMismatch {
    expected: ElementType,
    actual: ElementType,
  },
  #[error("输出张量形状不匹配: 期望 {expected:?}, 实际 {actual:?}")]
  OutputShapeMismatch {
    expected: Vec<usize>,
    actual: Vec<usize>,
  },
}

impl ClassifyError {
  /// 进程退出码，所有失败统一为 1
  pub fn exit_code(&self) -> i32 {
    1
  }
}

/// 任务错误对应的进程退出码，非分类流程错误同样为 1
pub fn exit_code(err: &anyhow::Error) -> i32 {
  err
    .chain()
    .find_map(|cause| cause.downcast_ref::<ClassifyError>())
    .map_or(1, ClassifyError::exit_code)
}
