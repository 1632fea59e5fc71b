//! 自動翻訳API（MyMemory）クライアント
//!
//! 辞書にない工程名だけがここに来る。失敗は呼び出し側で原文にフォールバックする。

use crate::config::Config;
use crate::error::{CostReportError, Result};
use cost_report_common::Translator;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// 言語ペア（簡体字中国語 → 英語）
pub const LANG_PAIR: &str = "zh-CN|en";

/// MyMemory 翻訳API
pub struct MyMemoryTranslator {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl MyMemoryTranslator {
    pub fn new(endpoint: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| CostReportError::Translation(format!("HTTPクライアント生成エラー: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.translate_endpoint.clone(), config.translate_timeout_seconds)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Translator for MyMemoryTranslator {
    fn translate(&self, text: &str) -> std::result::Result<String, String> {
        debug!(text, "翻訳APIに問い合わせ");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", text), ("langpair", LANG_PAIR)])
            .send()
            .map_err(|e| format!("リクエスト失敗: {}", e))?;

        let payload: Value = response
            .json()
            .map_err(|e| format!("レスポンス解析失敗: {}", e))?;

        parse_translation_response(&payload)
            .ok_or_else(|| format!("翻訳結果なし: {}", payload))
    }
}

/// レスポンスJSONから訳文を取り出す
///
/// `responseStatus` が整数 200 で、`responseData.translatedText` が文字列のときのみ成功。
pub fn parse_translation_response(payload: &Value) -> Option<String> {
    if payload.get("responseStatus").and_then(Value::as_i64) != Some(200) {
        return None;
    }
    payload
        .get("responseData")
        .and_then(|data| data.get("translatedText"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
