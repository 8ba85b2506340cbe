// 该文件是 Baize （白泽） 项目的一部分。
// src/output/json_report.rs - JSON 报告输出
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

use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, model::ClassifyResult, output::Render};

#[derive(Error, Debug)]
pub enum JsonReportOutputError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("JSON 错误: {0}")]
  JsonError(#[from] serde_json::Error),
  #[error("URI 方案不匹配: 期望 '{expected}', 实际 '{actual}'")]
  SchemeMismatch { expected: String, actual: String },
}

/// 将分类结果写入 JSON 文件
pub struct JsonReportOutput {
  path: PathBuf,
}

impl FromUrlWithScheme for JsonReportOutput {
  const SCHEME: &'static str = "json";
}

impl FromUrl for JsonReportOutput {
  type Error = JsonReportOutputError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(JsonReportOutputError::SchemeMismatch {
        expected: Self::SCHEME.to_string(),
        actual: uri.scheme().to_string(),
      });
    }

    Ok(JsonReportOutput {
      path: PathBuf::from(uri.path()),
    })
  }
}

impl JsonReportOutput {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn to_json(result: &ClassifyResult) -> Value {
    let categories = result
      .categories
      .iter()
      .enumerate()
      .map(|(rank, c)| {
        json!({
          "rank": rank + 1,
          "class_index": c.class_index,
          "score": c.score,
          "label": c.label,
        })
      })
      .collect::<Vec<_>>();

    json!({ "categories": categories })
  }

  fn save_report(&self, report: &Value) -> Result<(), JsonReportOutputError> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(&self.path)?;
    serde_json::to_writer_pretty(file, report)?;

    info!("保存分类报告到文件: {}", self.path.display());
    Ok(())
  }
}

impl<F> Render<F, ClassifyResult> for JsonReportOutput {
  type Error = JsonReportOutputError;

  fn render_result(&self, _frame: &F, result: &ClassifyResult) -> Result<(), Self::Error> {
    self.save_report(&Self::to_json(result))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::Category;

  #[test]
  fn writes_ranked_categories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("report.json");
    let output = JsonReportOutput::new(&path);

    let result = ClassifyResult {
      categories: vec![Category {
        class_index: 653,
        score: 0.78125,
        label: Some("military uniform".to_string()),
      }]
      .into_boxed_slice(),
    };
    output.render_result(&(), &result).unwrap();

    let report: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let first = &report["categories"][0];
    assert_eq!(first["rank"], 1);
    assert_eq!(first["class_index"], 653);
    assert_eq!(first["score"], 0.78125);
    assert_eq!(first["label"], "military uniform");
  }

  #[test]
  fn path_comes_from_url() {
    let url = Url::parse("json:///var/tmp/baize.json").unwrap();
    let output = JsonReportOutput::from_url(&url).unwrap();
    assert_eq!(output.path(), Path::new("/var/tmp/baize.json"));
  }
}
