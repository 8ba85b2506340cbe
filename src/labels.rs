// 该文件是 Baize （白泽） 项目的一部分。
// src/labels.rs - 类别标签
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

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum LabelsError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
}

/// 类别标签表，第 i 行对应第 i 类
#[derive(Debug, Clone, Default)]
pub struct Labels {
  names: Box<[String]>,
}

impl Labels {
  pub fn load(path: impl AsRef<Path>) -> Result<Self, LabelsError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let labels = Self::parse(&content);
    debug!("从 {} 读取 {} 个标签", path.as_ref().display(), labels.len());
    Ok(labels)
  }

  /// 读取标签文件，失败时仅告警
  pub fn load_or_warn(path: impl AsRef<Path>) -> Option<Self> {
    match Self::load(path.as_ref()) {
      Ok(labels) => Some(labels),
      Err(e) => {
        warn!("无法读取标签文件 {}: {}，仅输出类别编号", path.as_ref().display(), e);
        None
      }
    }
  }

  pub fn parse(content: &str) -> Self {
    let names = content
      .lines()
      .map(|line| line.trim_end_matches('\r').trim().to_string())
      .collect::<Vec<_>>();
    Self {
      names: names.into_boxed_slice(),
    }
  }

  pub fn get(&self, class_index: usize) -> Option<&str> {
    self
      .names
      .get(class_index)
      .map(String::as_str)
      .filter(|name| !name.is_empty())
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  #[test]
  fn parse_maps_lines_to_indices() {
    let labels = Labels::parse("background\ntench\r\ngoldfish\n\n");
    assert_eq!(labels.len(), 4);
    assert_eq!(labels.get(0), Some("background"));
    assert_eq!(labels.get(1), Some("tench"));
    assert_eq!(labels.get(2), Some("goldfish"));
    assert_eq!(labels.get(3), None);
    assert_eq!(labels.get(1000), None);
  }

  #[test]
  fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "background").unwrap();
    writeln!(file, "military uniform").unwrap();
    let labels = Labels::load(file.path()).unwrap();
    assert_eq!(labels.get(1), Some("military uniform"));
  }

  #[test]
  fn load_or_warn_tolerates_missing_file() {
    assert!(Labels::load_or_warn("/nonexistent/baize/labels.txt").is_none());
  }
}
