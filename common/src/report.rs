//! レポートデータの組み立て
//!
//! 抽出値と派生値（不良率・粗利率・加工費比率）をまとめる。

use crate::error::Result;
use crate::grid::Grid;
use crate::process_name::ProcessNameNormalizer;
use crate::process_table::{scan_process_table, ProcessEntry};
use crate::resolver::{resolve_value, Side};
use crate::translate::Translator;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 抽出ラベル
pub mod labels {
    pub const TOTAL_QTY: &str = "總投入數量";
    pub const GOOD_QTY: &str = "良品數量";
    pub const DEFECT_QTY: &str = "廢品數量";
    pub const INPUT_COST: &str = "投入成本";
    pub const PROCESSING_COST: &str = "加工成本";
    pub const OUTSOURCING_COST: &str = "外包成本";
    pub const TOTAL_COST: &str = "總成本";
    pub const UNIT_COST: &str = "單顆成本";
    pub const CURRENT_PRICE: &str = "目前售價";
    pub const SUGGESTED_PRICE: &str = "建議售價";
    pub const SUGGESTED_PRICE_FULL: &str = "建議售價 (毛利潤20%)";
}

lazy_static! {
    /// コスト項目の中英対照（空白なしのキーで保持）
    static ref COST_ITEM_TRANSLATIONS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("總投入數量", "Total Input Quantity");
        m.insert("良品數量", "Good Product Quantity");
        m.insert("廢品數量", "Defective Quantity");
        m.insert("投入成本", "Input Cost");
        m.insert("加工成本", "Processing Cost");
        m.insert("外包成本", "Outsourcing Cost");
        m.insert("總成本", "Total Cost");
        m.insert("單顆成本", "Unit Cost");
        m.insert("目前售價", "Current Selling Price");
        m.insert("建議售價(毛利潤20%)", "Suggested Selling Price (20% Profit Margin)");
        m
    };
}

/// コスト項目の「中文 | English」ラベル
///
/// 空白の有無が違う表記（`建議售價 (毛利潤20%)` など）は同じ項目として扱う。
/// 未登録の項目は英語側も原文になる。
pub fn cost_item_label(item: &str) -> String {
    let key: String = item.chars().filter(|c| !c.is_whitespace()).collect();
    let english = COST_ITEM_TRANSLATIONS.get(key.as_str()).copied().unwrap_or(item);
    format!("{} | {}", item, english)
}

/// 通貨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Ntd,
    Usd,
    Eur,
    Aud,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 5] = [
        Currency::Ntd,
        Currency::Usd,
        Currency::Eur,
        Currency::Aud,
        Currency::Gbp,
    ];

    /// 通貨コード
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Ntd => "NTD",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Aud => "AUD",
            Currency::Gbp => "GBP",
        }
    }

    /// 選択肢の表示名
    pub fn display_name(&self) -> &'static str {
        match self {
            Currency::Ntd => "台幣 (NTD)",
            Currency::Usd => "美金 (USD)",
            Currency::Eur => "歐元 (EUR)",
            Currency::Aud => "澳幣 (AUD)",
            Currency::Gbp => "英鎊 (GBP)",
        }
    }

    /// 既定の為替レート（1外貨 = ? 台幣）
    pub fn default_rate(&self) -> f64 {
        match self {
            Currency::Ntd => 1.0,
            Currency::Usd => 32.5,
            Currency::Eur => 35.5,
            Currency::Aud => 21.5,
            Currency::Gbp => 41.0,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ntd" | "twd" | "台幣" => Ok(Currency::Ntd),
            "usd" | "美金" => Ok(Currency::Usd),
            "eur" | "歐元" => Ok(Currency::Eur),
            "aud" | "澳幣" => Ok(Currency::Aud),
            "gbp" | "英鎊" => Ok(Currency::Gbp),
            _ => Err(format!("Unknown currency: {}. Use ntd, usd, eur, aud, or gbp", s)),
        }
    }
}

/// 片側ブロックの数値
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideFigures {
    pub total_qty: Option<f64>,
    pub good_qty: Option<f64>,
    pub defect_qty: Option<f64>,
    /// 良品率（%、小数2桁）
    pub good_rate: Option<f64>,
    /// 不良率（%、小数2桁）
    pub defect_rate: Option<f64>,
    pub input_cost: Option<f64>,
    pub processing_cost: Option<f64>,
    /// 総成本に占める加工成本（%、小数1桁）
    pub processing_pct: Option<f64>,
    pub total_cost: Option<f64>,
    pub unit_cost: Option<f64>,
    /// 現況は目前售價、評価は建議售價
    pub price: Option<f64>,
    /// 粗利率（%、小数1桁、現況のみ）
    pub margin: Option<f64>,
}

impl SideFigures {
    /// グリッドから片側の値を抽出し、派生値を計算する
    ///
    /// 数量はレート換算しない。金額は `rate` で割る。
    pub fn extract(grid: &Grid, side: Side, rate: f64) -> Self {
        let price_label = match side {
            Side::Current => labels::CURRENT_PRICE,
            Side::Evaluation => labels::SUGGESTED_PRICE,
        };

        let mut figures = Self {
            total_qty: resolve_value(grid, labels::TOTAL_QTY, side, 1.0),
            good_qty: resolve_value(grid, labels::GOOD_QTY, side, 1.0),
            input_cost: resolve_value(grid, labels::INPUT_COST, side, rate),
            processing_cost: resolve_value(grid, labels::PROCESSING_COST, side, rate),
            total_cost: resolve_value(grid, labels::TOTAL_COST, side, rate),
            unit_cost: resolve_value(grid, labels::UNIT_COST, side, rate),
            price: resolve_value(grid, price_label, side, rate),
            ..Default::default()
        };
        figures.derive(side);
        figures
    }

    /// 派生値を計算する
    pub fn derive(&mut self, side: Side) {
        if let (Some(total), Some(good)) = (self.total_qty, self.good_qty) {
            self.defect_qty = Some(total - good);
            if total != 0.0 {
                let good_rate = round_to(good / total * 100.0, 2);
                self.good_rate = Some(good_rate);
                self.defect_rate = Some(round_to(100.0 - good_rate, 2));
            }
        }

        if let (Some(processing), Some(total_cost)) = (self.processing_cost, self.total_cost) {
            if total_cost != 0.0 {
                self.processing_pct = Some(round_to(processing / total_cost * 100.0, 1));
            }
        }

        if side == Side::Current {
            if let (Some(price), Some(unit)) = (self.price, self.unit_cost) {
                if unit != 0.0 {
                    self.margin = Some(round_to((price - unit) / unit * 100.0, 1));
                }
            }
        }
    }
}

/// 小数点以下 `places` 桁に丸める（ちょうど半分は偶数側）
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// レポート全体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub part_no: String,
    pub currency: Currency,
    pub rate: f64,
    pub current: SideFigures,
    pub evaluation: SideFigures,
    pub processes: Vec<ProcessEntry>,
}

impl ReportData {
    /// JSON文字列に変換
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Excelバイト列に変換
    #[cfg(feature = "excel")]
    pub fn to_excel(&self) -> Result<Vec<u8>> {
        crate::export::excel_core::generate_report_excel_buffer(self).map_err(crate::error::Error::Export)
    }
}

/// グリッドからレポートデータを組み立てる
///
/// `part_no` / `currency` / `rate` は検証済みであること。
pub fn build_report<T: Translator>(
    grid: &Grid,
    part_no: &str,
    currency: Currency,
    rate: f64,
    normalizer: &mut ProcessNameNormalizer<T>,
) -> ReportData {
    ReportData {
        part_no: part_no.to_string(),
        currency,
        rate,
        current: SideFigures::extract(grid, Side::Current, rate),
        evaluation: SideFigures::extract(grid, Side::Evaluation, rate),
        processes: scan_process_table(grid, rate, normalizer),
    }
}

/// ワークシートに記載された品番（2行目3列目）
pub fn sheet_part_no(grid: &Grid) -> Option<String> {
    grid.text(1, 2).map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
