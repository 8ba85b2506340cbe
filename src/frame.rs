// 该文件是 Baize （白泽） 项目的一部分。
// src/frame.rs - NHWC 帧定义
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

use crate::input::AsNhwcFrame;

pub const RGB_CHANNELS: usize = 3;

#[derive(Error, Debug)]
pub enum FrameError {
  #[error("数据长度不匹配: 期望长度 {expected}, 实际长度 {actual}")]
  LengthMismatch { expected: usize, actual: usize },
}

/// 固定尺寸的 RGB 帧，按 NHWC 排列
#[derive(Debug, Clone)]
pub struct RgbNhwcFrame<const W: u32, const H: u32> {
  data: Box<[u8]>,
}

impl<const W: u32, const H: u32> RgbNhwcFrame<W, H> {
  pub const LEN: usize = RGB_CHANNELS * W as usize * H as usize;

  /// 对应的输入张量形状 `[1, H, W, 3]`
  pub fn tensor_dims() -> Vec<usize> {
    vec![1, H as usize, W as usize, RGB_CHANNELS]
  }
}

impl<const W: u32, const H: u32> TryFrom<Vec<u8>> for RgbNhwcFrame<W, H> {
  type Error = FrameError;

  fn try_from(data: Vec<u8>) -> Result<Self, Self::Error> {
    if data.len() != Self::LEN {
      return Err(FrameError::LengthMismatch {
        expected: Self::LEN,
        actual: data.len(),
      });
    }

    Ok(Self {
      data: data.into_boxed_slice(),
    })
  }
}

impl<const W: u32, const H: u32> Default for RgbNhwcFrame<W, H> {
  fn default() -> Self {
    Self {
      data: vec![0u8; Self::LEN].into_boxed_slice(),
    }
  }
}

impl<const W: u32, const H: u32> AsNhwcFrame<W, H> for RgbNhwcFrame<W, H> {
  fn as_nhwc(&self) -> &[u8] {
    &self.data
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn try_from_checks_length() {
    let frame = RgbNhwcFrame::<4, 2>::try_from(vec![1u8; 24]).unwrap();
    assert_eq!(frame.as_nhwc().len(), 24);
    assert_eq!(RgbNhwcFrame::<4, 2>::tensor_dims(), vec![1, 2, 4, 3]);

    match RgbNhwcFrame::<4, 2>::try_from(vec![0u8; 23]) {
      Err(FrameError::LengthMismatch { expected, actual }) => {
        assert_eq!((expected, actual), (24, 23));
      }
      Ok(_) => panic!("short buffer accepted"),
    }
  }
}
