//! 対話入力（品番・通貨）

use crate::error::{CostReportError, Result};
use cost_report_common::Currency;
use dialoguer::{Input, Select};

/// 通貨選択肢の表示名
pub fn currency_choices() -> Vec<&'static str> {
    Currency::ALL.iter().map(Currency::display_name).collect()
}

/// 品番を入力（ワークシート記載の品番があれば既定値にする）
pub fn prompt_part_no(sheet_default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt("📝 產品編號 (Part No.)")
        .allow_empty(true);
    if let Some(default) = sheet_default {
        input = input.default(default.to_string());
    }

    input
        .interact_text()
        .map_err(|e| CostReportError::Prompt(e.to_string()))
}

/// 通貨を選択
pub fn select_currency() -> Result<Currency> {
    let index = Select::new()
        .with_prompt("💱 幣別")
        .items(currency_choices().as_slice())
        .default(0)
        .interact()
        .map_err(|e| CostReportError::Prompt(e.to_string()))?;

    Currency::ALL
        .get(index)
        .copied()
        .ok_or_else(|| CostReportError::Prompt(format!("無効な選択: {}", index)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_choices_order() {
        let choices = currency_choices();
        assert_eq!(choices.len(), 5);
        assert_eq!(choices[0], "台幣 (NTD)");
        assert_eq!(choices[4], "英鎊 (GBP)");
    }
}
