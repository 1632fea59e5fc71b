//! 読み込みからレポート組み立てまで

use crate::config::Config;
use crate::error::Result;
use crate::loader::load_grid;
use crate::settings::ValidSettings;
use crate::translate::MyMemoryTranslator;
use cost_report_common::{
    build_report, Grid, NoopTranslator, ProcessNameNormalizer, ReportData, Translator,
};
use std::path::Path;
use tracing::{debug, info};

/// 実行時に選ぶ翻訳バックエンド
pub type DynTranslator = Box<dyn Translator>;

/// 設定とフラグから翻訳バックエンドを選ぶ
///
/// 無効時は `NoopTranslator`（辞書にない工程名は原文のまま）。
pub fn build_translator(config: &Config, enabled: bool) -> Result<DynTranslator> {
    if enabled && config.auto_translate {
        Ok(Box::new(MyMemoryTranslator::from_config(config)?))
    } else {
        debug!("自動翻訳は無効");
        Ok(Box::new(NoopTranslator))
    }
}

/// 1回の実行で共有する工程名ノーマライザ（翻訳キャッシュを保持）
pub fn build_normalizer(config: &Config, translate: bool) -> Result<ProcessNameNormalizer<DynTranslator>> {
    Ok(ProcessNameNormalizer::new(build_translator(config, translate)?))
}

/// 読み込み済みグリッドからレポートを作る
pub fn analyze_grid<T: Translator>(
    grid: &Grid,
    settings: &ValidSettings,
    normalizer: &mut ProcessNameNormalizer<T>,
) -> ReportData {
    let report = build_report(grid, &settings.part_no, settings.currency, settings.rate, normalizer);
    info!(
        part_no = %report.part_no,
        currency = %report.currency,
        processes = report.processes.len(),
        "レポート組み立て完了"
    );
    report
}

/// ワークブックを読み込んでレポートを作る
pub fn analyze_file<T: Translator>(
    path: &Path,
    sheet: Option<&str>,
    header_rows: usize,
    settings: &ValidSettings,
    normalizer: &mut ProcessNameNormalizer<T>,
) -> Result<ReportData> {
    let grid = load_grid(path, sheet, header_rows)?;
    Ok(analyze_grid(&grid, settings, normalizer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cost_report_common::Currency;

    #[test]
    fn test_build_translator_disabled() {
        let config = Config::default();
        let translator = build_translator(&config, false).unwrap();
        assert_eq!(translator.translate("研磨"), Ok("研磨".to_string()));
    }

    #[test]
    fn test_analyze_grid_uses_settings() {
        let grid = Grid::from_strings(vec![vec!["總成本", "", "1000"]]);
        let settings = ValidSettings {
            part_no: "P1".to_string(),
            currency: Currency::Ntd,
            rate: 1.0,
        };
        let mut normalizer = ProcessNameNormalizer::new(NoopTranslator);

        let report = analyze_grid(&grid, &settings, &mut normalizer);
        assert_eq!(report.part_no, "P1");
        assert_eq!(report.current.total_cost, Some(1000.0));
        // 評価ブロックにラベルがなければ同じ行の一致にフォールバック
        assert_eq!(report.evaluation.total_cost, Some(1000.0));
        assert!(report.processes.is_empty());
    }
}
