use crate::error::{CostReportError, Result};
use cost_report_common::Currency;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 自動翻訳APIのURL
    pub translate_endpoint: String,
    pub translate_timeout_seconds: u64,
    /// 自動翻訳を使うか（false なら辞書にない工程名は原文のまま）
    pub auto_translate: bool,
    /// ワークシート先頭の見出し行数（グリッドから除外）
    pub header_rows: usize,
    /// 通貨ごとの既定レート上書き
    pub rate_overrides: HashMap<Currency, f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CostReportError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("cost-report").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            translate_endpoint: DEFAULT_TRANSLATE_ENDPOINT.into(),
            translate_timeout_seconds: 5,
            auto_translate: true,
            header_rows: 1,
            rate_overrides: HashMap::new(),
        }
    }

    /// 通貨の既定レート（上書きがあればそちら）
    pub fn rate_for(&self, currency: Currency) -> f64 {
        self.rate_overrides
            .get(&currency)
            .copied()
            .unwrap_or_else(|| currency.default_rate())
    }

    pub fn set_rate(&mut self, currency: Currency, rate: f64) -> Result<()> {
        if !(rate > 0.0) || !rate.is_finite() {
            return Err(CostReportError::Config(format!("レートは正の数で指定してください: {}", rate)));
        }
        self.rate_overrides.insert(currency, rate);
        Ok(())
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(CostReportError::Config("タイムアウトは1秒以上で指定してください".into()));
        }
        self.translate_timeout_seconds = seconds;
        Ok(())
    }
}

/// `USD=32.1` 形式のレート指定をパース
pub fn parse_rate_assignment(value: &str) -> std::result::Result<(Currency, f64), String> {
    let (code, rate) = value
        .split_once('=')
        .ok_or_else(|| format!("CUR=RATE 形式で指定してください: {}", value))?;
    let currency: Currency = code.parse()?;
    let rate: f64 = rate
        .trim()
        .parse()
        .map_err(|_| format!("レートが数値ではありません: {}", rate))?;
    Ok((currency, rate))
}
