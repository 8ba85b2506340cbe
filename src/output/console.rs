// 该文件是 Baize （白泽） 项目的一部分。
// src/output/console.rs - 控制台输出
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

use std::io::Write;

use thiserror::Error;
use url::Url;

use crate::{
  FromUrl, FromUrlWithScheme,
  model::{Category, ClassifyResult},
  output::Render,
};

#[derive(Error, Debug)]
pub enum ConsoleOutputError {
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
  #[error("URI 方案不匹配: 期望 '{expected}', 实际 '{actual}'")]
  SchemeMismatch { expected: String, actual: String },
}

/// 按排名逐行打印到标准输出
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl FromUrlWithScheme for ConsoleOutput {
  const SCHEME: &'static str = "stdout";
}

impl FromUrl for ConsoleOutput {
  type Error = ConsoleOutputError;

  fn from_url(uri: &Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(ConsoleOutputError::SchemeMismatch {
        expected: Self::SCHEME.to_string(),
        actual: uri.scheme().to_string(),
      });
    }
    Ok(ConsoleOutput)
  }
}

/// 六位有效数字，去掉末尾的零，与 C 的 `%g` 一致
pub fn format_score(score: f32) -> String {
  const PRECISION: i32 = 6;

  if score.is_nan() {
    return "nan".to_string();
  }
  if score.is_infinite() {
    return if score > 0.0 { "inf" } else { "-inf" }.to_string();
  }
  if score == 0.0 {
    return if score.is_sign_negative() { "-0" } else { "0" }.to_string();
  }

  let value = f64::from(score);
  // 先按有效数字舍入，再由舍入后的指数决定记法
  let sci = format!("{:.*e}", (PRECISION - 1) as usize, value);
  let Some((mantissa, exponent)) = sci.split_once('e') else {
    return sci;
  };
  let exponent: i32 = exponent.parse().unwrap_or(0);

  if exponent < -4 || exponent >= PRECISION {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!(
      "{}e{}{:02}",
      trim_fraction(mantissa),
      sign,
      exponent.abs()
    )
  } else {
    let fixed = format!("{:.*}", (PRECISION - 1 - exponent) as usize, value);
    trim_fraction(&fixed).to_string()
  }
}

fn trim_fraction(number: &str) -> &str {
  if number.contains('.') {
    number.trim_end_matches('0').trim_end_matches('.')
  } else {
    number
  }
}

impl ConsoleOutput {
  pub fn format_category(category: &Category) -> String {
    let score = format_score(category.score);
    match &category.label {
      Some(label) => format!("Class {}: score = {} ({})", category.class_index, score, label),
      None => format!("Class {}: score = {}", category.class_index, score),
    }
  }

  pub fn write_result<W: Write>(
    &self,
    writer: &mut W,
    result: &ClassifyResult,
  ) -> Result<(), ConsoleOutputError> {
    for category in result.categories.iter() {
      writeln!(writer, "{}", Self::format_category(category))?;
    }
    writer.flush()?;
    Ok(())
  }
}

impl<F> Render<F, ClassifyResult> for ConsoleOutput {
  type Error = ConsoleOutputError;

  fn render_result(&self, _frame: &F, result: &ClassifyResult) -> Result<(), Self::Error> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    self.write_result(&mut handle, result)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn result() -> ClassifyResult {
    ClassifyResult {
      categories: vec![
        Category {
          class_index: 653,
          score: 0.78125,
          label: Some("military uniform".to_string()),
        },
        Category {
          class_index: 907,
          score: 0.5,
          label: None,
        },
      ]
      .into_boxed_slice(),
    }
  }

  #[test]
  fn writes_one_line_per_category() {
    let mut buf = Vec::new();
    ConsoleOutput.write_result(&mut buf, &result()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(
      text,
      "Class 653: score = 0.78125 (military uniform)\nClass 907: score = 0.5\n"
    );
  }

  #[test]
  fn scores_use_six_significant_digits() {
    assert_eq!(format_score(0.78125), "0.78125");
    assert_eq!(format_score(0.10546875), "0.105469");
    assert_eq!(format_score(0.5), "0.5");
    assert_eq!(format_score(-0.2), "-0.2");
    assert_eq!(format_score(0.0), "0");
    assert_eq!(format_score(1.0), "1");
    assert_eq!(format_score(0.00001525879), "1.52588e-05");
    assert_eq!(format_score(1234567.0), "1.23457e+06");
    assert_eq!(format_score(999999.9), "1e+06");
  }

  #[test]
  fn reference_lines_match_printed_output() {
    let category = Category {
      class_index: 907,
      score: 27.0 / 256.0,
      label: None,
    };
    assert_eq!(
      ConsoleOutput::format_category(&category),
      "Class 907: score = 0.105469"
    );
  }

  #[test]
  fn rejects_other_scheme() {
    let url = Url::parse("json:///tmp/out.json").unwrap();
    assert!(matches!(
      ConsoleOutput::from_url(&url),
      Err(ConsoleOutputError::SchemeMismatch { .. })
    ));
  }
}
