// 该文件是 Baize （白泽） 项目的一部分。
// src/input/read_image_file.rs - 图像文件输入
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

use std::path::Path;

use image::{ImageReader, RgbImage, imageops::FilterType};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
  error::ClassifyError,
  frame::{FrameError, RgbNhwcFrame},
};

#[derive(Error, Debug)]
pub enum ImageFileInputError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("图像解码错误: {0}")]
  ImageLoadError(#[from] image::ImageError),
  #[error("帧错误: {0}")]
  FrameError(#[from] FrameError),
}

impl From<ImageFileInputError> for ClassifyError {
  fn from(err: ImageFileInputError) -> Self {
    ClassifyError::ImageLoadFailure(err.to_string())
  }
}

/// 从文件读取一张图像，缩放到 `W x H` 并转换为 RGB
pub struct ImageFileInput<const W: u32, const H: u32> {
  frame: Option<RgbNhwcFrame<W, H>>,
}

impl<const W: u32, const H: u32> ImageFileInput<W, H> {
  pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageFileInputError> {
    let path = path.as_ref();
    info!("读取图像文件: {}", path.display());

    let decoded = ImageReader::open(path)
      .and_then(|reader| reader.with_guessed_format())
      .map_err(|e| {
        error!("无法打开图像文件 {}: {}", path.display(), e);
        e
      })?
      .decode()
      .map_err(|e| {
        error!("无法解码图像文件 {}: {}", path.display(), e);
        e
      })?;
    debug!("原始图像尺寸: {}x{}", decoded.width(), decoded.height());

    Self::from_image(decoded.to_rgb8())
  }

  pub fn from_image(image: RgbImage) -> Result<Self, ImageFileInputError> {
    let image = if image.dimensions() == (W, H) {
      image
    } else {
      image::imageops::resize(&image, W, H, FilterType::Triangle)
    };
    debug!("图像已缩放至 {}x{}", W, H);

    let frame = RgbNhwcFrame::try_from(image).map_err(|e| {
      error!("图像转换为帧失败: {}", e);
      e
    })?;
    Ok(Self { frame: Some(frame) })
  }

  pub fn into_nhwc(self) -> ImageFileInputNhwc<W, H> {
    ImageFileInputNhwc { inner: self }
  }
}

pub struct ImageFileInputNhwc<const W: u32, const H: u32> {
  inner: ImageFileInput<W, H>,
}

impl<const W: u32, const H: u32> Iterator for ImageFileInputNhwc<W, H> {
  type Item = RgbNhwcFrame<W, H>;

  fn next(&mut self) -> Option<Self::Item> {
    self.inner.frame.take()
  }
}

impl<const W: u32, const H: u32> TryFrom<RgbImage> for RgbNhwcFrame<W, H> {
  type Error = FrameError;

  // RgbImage 的原始缓冲区即为 HWC 排列的 RGB 字节
  fn try_from(image: RgbImage) -> Result<Self, Self::Error> {
    RgbNhwcFrame::try_from(image.into_raw())
  }
}
