// 该文件是 Baize （白泽） 项目的一部分。
// src/tensor.rs - 张量描述与量化输出视图
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

use std::fmt;

use crate::error::ClassifyError;

/// 张量元素类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementType {
  UInt8,
  Int8,
  Float32,
  Other(String),
}

impl fmt::Display for ElementType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ElementType::UInt8 => write!(f, "uint8"),
      ElementType::Int8 => write!(f, "int8"),
      ElementType::Float32 => write!(f, "float32"),
      ElementType::Other(name) => write!(f, "{}", name),
    }
  }
}

/// 张量的形状与元素类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorInfo {
  pub dims: Vec<usize>,
  pub element_type: ElementType,
}

impl TensorInfo {
  pub fn new(dims: impl Into<Vec<usize>>, element_type: ElementType) -> Self {
    Self {
      dims: dims.into(),
      element_type,
    }
  }

  /// 元素总数
  pub fn element_count(&self) -> usize {
    self.dims.iter().product()
  }
}

/// 每张量量化参数，由模型提供
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizationParams {
  pub scale: f32,
  pub zero_point: i32,
}

impl QuantizationParams {
  pub fn new(scale: f32, zero_point: i32) -> Self {
    Self { scale, zero_point }
  }
}

impl Default for QuantizationParams {
  // 未量化的 u8 张量按原值解释
  fn default() -> Self {
    Self {
      scale: 1.0,
      zero_point: 0,
    }
  }
}

/// 推理引擎输出张量的拷贝
#[derive(Debug, Clone)]
pub struct QuantizedOutput {
  pub info: TensorInfo,
  pub data: Box<[u8]>,
  pub params: Option<QuantizationParams>,
}

impl QuantizedOutput {
  pub fn new(info: TensorInfo, data: impl Into<Box<[u8]>>, params: Option<QuantizationParams>) -> Self {
    Self {
      info,
      data: data.into(),
      params,
    }
  }

  /// 返回长度恰为 `class_count` 的分数视图
  ///
  /// 形状必须为 `[1, class_count]`，且数据长度与之相符，否则返回
  /// [`ClassifyError::OutputShapeMismatch`]。
  pub fn class_scores(&self, class_count: usize) -> Result<&[u8], ClassifyError> {
    let expected = vec![1, class_count];
    if self.info.dims != expected {
      return Err(ClassifyError::OutputShapeMismatch {
        expected,
        actual: self.info.dims.clone(),
      });
    }

    if self.data.len() != class_count {
      return Err(ClassifyError::OutputShapeMismatch {
        expected: vec![1, class_count],
        actual: vec![1, self.data.len()],
      });
    }

    Ok(&self.data)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn output(dims: Vec<usize>, len: usize) -> QuantizedOutput {
    QuantizedOutput::new(
      TensorInfo::new(dims, ElementType::UInt8),
      vec![7u8; len],
      Some(QuantizationParams::new(0.5, 0)),
    )
  }

  #[test]
  fn class_scores_returns_view_of_declared_length() {
    let out = output(vec![1, 4], 4);
    assert_eq!(out.class_scores(4).unwrap(), &[7, 7, 7, 7]);
  }

  #[test]
  fn class_scores_rejects_wrong_dims() {
    let out = output(vec![1, 1000], 1000);
    match out.class_scores(1001) {
      Err(ClassifyError::OutputShapeMismatch { expected, actual }) => {
        assert_eq!(expected, vec![1, 1001]);
        assert_eq!(actual, vec![1, 1000]);
      }
      other => panic!("unexpected result: {:?}", other),
    }
  }

  #[test]
  fn class_scores_rejects_short_buffer() {
    let out = output(vec![1, 8], 5);
    assert!(matches!(
      out.class_scores(8),
      Err(ClassifyError::OutputShapeMismatch { .. })
    ));
  }

  #[test]
  fn element_type_display() {
    assert_eq!(ElementType::UInt8.to_string(), "uint8");
    assert_eq!(ElementType::Other("qi32".into()).to_string(), "qi32");
    assert_eq!(TensorInfo::new([1, 224, 224, 3], ElementType::UInt8).element_count(), 150528);
  }
}
