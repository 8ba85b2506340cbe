// 该文件是 Baize （白泽） 项目的一部分。
// tests/image_input.rs - 图像输入测试
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

#![cfg(feature = "read_image_file")]

use baize::{
  frame::RgbNhwcFrame,
  input::{AsNhwcFrame, ImageFileInput},
};
use image::{Rgb, RgbImage};

#[test]
fn bmp_is_resized_to_model_input() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("grace_hopper.bmp");
  RgbImage::from_pixel(517, 606, Rgb([12, 34, 56]))
    .save(&path)
    .unwrap();

  let frame: RgbNhwcFrame<224, 224> = ImageFileInput::open(&path)
    .unwrap()
    .into_nhwc()
    .next()
    .unwrap();

  let data = frame.as_nhwc();
  assert_eq!(data.len(), 224 * 224 * 3);
  assert!(data.chunks(3).all(|px| px == [12, 34, 56]));
}

#[test]
fn png_keeps_channel_order() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("red.png");
  RgbImage::from_pixel(8, 8, Rgb([255, 0, 0])).save(&path).unwrap();

  let frame = ImageFileInput::<8, 8>::open(&path)
    .unwrap()
    .into_nhwc()
    .next()
    .unwrap();
  assert_eq!(&frame.as_nhwc()[..3], &[255, 0, 0]);
}

#[test]
fn undecodable_file_is_an_error() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("broken.bmp");
  std::fs::write(&path, b"not an image").unwrap();

  assert!(ImageFileInput::<8, 8>::open(&path).is_err());
}
