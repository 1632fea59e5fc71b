//! レポート設定の検証

use crate::error::{CostReportError, Result};
use cost_report_common::Currency;

/// 抽出前に確定させるレポート設定
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub part_no: String,
    pub currency: Option<Currency>,
    pub rate: f64,
}

/// 検証済みの設定
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSettings {
    pub part_no: String,
    pub currency: Currency,
    pub rate: f64,
}

impl ReportSettings {
    /// 品番・通貨・レートを検証する
    ///
    /// 誤りはまとめて `InvalidSettings` で返す。
    pub fn validate(&self) -> Result<ValidSettings> {
        let part_no = self.part_no.trim();
        let mut errors = Vec::new();

        if part_no.is_empty() {
            errors.push("產品編號為必填項目".to_string());
        }
        if self.currency.is_none() {
            errors.push("幣別為必填項目，請選擇".to_string());
        }
        if !(self.rate > 0.0) || !self.rate.is_finite() {
            errors.push("匯率必須大於 0".to_string());
        }

        match self.currency {
            Some(currency) if errors.is_empty() => Ok(ValidSettings {
                part_no: part_no.to_string(),
                currency,
                rate: self.rate,
            }),
            _ => Err(CostReportError::InvalidSettings(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_settings() {
        let settings = ReportSettings {
            part_no: " 3-041004 ".to_string(),
            currency: Some(Currency::Usd),
            rate: 32.5,
        };
        let valid = settings.validate().unwrap();
        assert_eq!(valid.part_no, "3-041004");
        assert_eq!(valid.currency, Currency::Usd);
    }

    #[test]
    fn test_collects_all_errors() {
        let settings = ReportSettings {
            part_no: "  ".to_string(),
            currency: None,
            rate: 0.0,
        };
        match settings.validate() {
            Err(CostReportError::InvalidSettings(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("InvalidSettings になっていない: {:?}", other),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let settings = ReportSettings {
            part_no: "A".to_string(),
            currency: Some(Currency::Ntd),
            rate: -1.0,
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("匯率必須大於 0"));
    }
}
