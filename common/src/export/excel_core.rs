//! Excel生成（共通ライブラリ）
//!
//! HTMLと同じ構成（現況表・評価表・工程比較表）を1シートに出力する。

use crate::render::{format_percent, format_price, format_quantity, MISSING};
use crate::report::{cost_item_label, labels, ReportData, SideFigures};
use rust_xlsxwriter::*;

const SHEET_NAME: &str = "Cost Analysis";
const ITEM_COL_WIDTH: f64 = 42.0;
const VALUE_COL_WIDTH: f64 = 18.0;

struct Formats {
    title: Format,
    header: Format,
    value: Format,
    highlight: Format,
}

impl Formats {
    fn new() -> Self {
        let border = |f: Format| f.set_border(FormatBorder::Thin).set_border_color(Color::RGB(0xCCCCCC));
        Self {
            title: Format::new().set_bold().set_font_size(14.0),
            header: border(
                Format::new()
                    .set_bold()
                    .set_background_color(Color::RGB(0xE0E0E0))
                    .set_align(FormatAlign::Center),
            ),
            value: border(Format::new().set_align(FormatAlign::Center)),
            highlight: border(
                Format::new()
                    .set_bold()
                    .set_background_color(Color::RGB(0xE3F2FD))
                    .set_align(FormatAlign::Center),
            ),
        }
    }
}

fn write_row(
    worksheet: &mut Worksheet,
    row: u32,
    cells: &[&str],
    format: &Format,
) -> Result<(), String> {
    for (col, value) in cells.iter().enumerate() {
        worksheet
            .write_string_with_format(row, col as u16, *value, format)
            .map_err(|e| format!("セル書き込みエラー: {}", e))?;
    }
    Ok(())
}

/// 片側の表の見出しと価格行の出し方
struct SideLayout {
    heading: &'static str,
    price_item: &'static str,
    show_margin: bool,
}

const CURRENT_LAYOUT: SideLayout = SideLayout {
    heading: "現況：成本分析 | Current Situation: Cost Analysis",
    price_item: labels::CURRENT_PRICE,
    show_margin: true,
};

const EVALUATION_LAYOUT: SideLayout = SideLayout {
    heading: "評估：報價 | Evaluation: Quotation",
    price_item: labels::SUGGESTED_PRICE_FULL,
    show_margin: false,
};

/// 片側の表を書き込み、次の空き行を返す
fn write_side(
    worksheet: &mut Worksheet,
    formats: &Formats,
    start_row: u32,
    layout: &SideLayout,
    figures: &SideFigures,
    currency: &str,
) -> Result<u32, String> {
    let mut row = start_row;
    worksheet
        .write_string_with_format(row, 0, layout.heading, &formats.title)
        .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    row += 1;

    let cost_header = format!("成本 ({c}) | Cost ({c})", c = currency);
    write_row(
        worksheet,
        row,
        &["項目 | Item", "數量 | Quantity", "百分比 | Percentage", cost_header.as_str()],
        &formats.header,
    )?;
    row += 1;

    let price = if layout.show_margin {
        format!("{} ({})", format_price(figures.price), format_percent(figures.margin, 1))
    } else {
        format_price(figures.price)
    };

    let lines: Vec<([String; 4], bool)> = vec![
        ([cost_item_label(labels::TOTAL_QTY), format_quantity(figures.total_qty), MISSING.into(), format_price(figures.input_cost)], false),
        ([cost_item_label(labels::GOOD_QTY), format_quantity(figures.good_qty), format_percent(figures.good_rate, 2), MISSING.into()], false),
        ([cost_item_label(labels::DEFECT_QTY), format_quantity(figures.defect_qty), format_percent(figures.defect_rate, 2), MISSING.into()], false),
        ([cost_item_label(labels::PROCESSING_COST), MISSING.into(), format_percent(figures.processing_pct, 1), format_price(figures.processing_cost)], false),
        ([cost_item_label(labels::TOTAL_COST), MISSING.into(), MISSING.into(), format_price(figures.total_cost)], false),
        ([cost_item_label(labels::UNIT_COST), MISSING.into(), MISSING.into(), format_price(figures.unit_cost)], true),
        ([cost_item_label(layout.price_item), MISSING.into(), MISSING.into(), price], false),
    ];

    for (cells, highlighted) in &lines {
        let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        let format = if *highlighted { &formats.highlight } else { &formats.value };
        write_row(worksheet, row, &refs, format)?;
        row += 1;
    }

    Ok(row + 1)
}

/// レポートのExcelをバッファに生成
pub fn generate_report_excel_buffer(report: &ReportData) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();
    let formats = Formats::new();
    let currency = report.currency.code();

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;
    worksheet
        .set_column_width(0, ITEM_COL_WIDTH)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    for col in 1..4u16 {
        worksheet
            .set_column_width(col, VALUE_COL_WIDTH)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }

    worksheet
        .write_string_with_format(0, 0, format!("成本分析 | Cost Analysis | {}", report.part_no), &formats.title)
        .map_err(|e| format!("タイトル書き込みエラー: {}", e))?;

    let mut row = write_side(worksheet, &formats, 2, &CURRENT_LAYOUT, &report.current, currency)?;
    row = write_side(worksheet, &formats, row, &EVALUATION_LAYOUT, &report.evaluation, currency)?;

    worksheet
        .write_string_with_format(row, 0, "工序比較 | Process Comparison", &formats.title)
        .map_err(|e| format!("見出し書き込みエラー: {}", e))?;
    row += 1;

    let current_header = format!("現況 ({c}) | Current Situation ({c})", c = currency);
    let evaluation_header = format!("評估 ({c}) | Evaluation ({c})", c = currency);
    write_row(
        worksheet,
        row,
        &["工序名稱 | Process Name", current_header.as_str(), evaluation_header.as_str()],
        &formats.header,
    )?;
    row += 1;

    for entry in &report.processes {
        let name = entry.name.to_string();
        let current = format_price(entry.current_cost);
        let evaluation = format_price(entry.evaluation_cost);
        write_row(worksheet, row, &[name.as_str(), current.as_str(), evaluation.as_str()], &formats.value)?;
        row += 1;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Currency;

    #[test]
    fn test_generate_report_excel_buffer() {
        let report = ReportData {
            part_no: "P-001".to_string(),
            currency: Currency::Ntd,
            rate: 1.0,
            current: SideFigures::default(),
            evaluation: SideFigures::default(),
            processes: Vec::new(),
        };
        let buffer = generate_report_excel_buffer(&report).expect("Excel生成失敗");
        // xlsx は zip（PK ヘッダ）
        assert!(buffer.starts_with(b"PK"));
    }

    #[test]
    fn test_write_side_rows() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let formats = Formats::new();
        let figures = SideFigures::default();

        // 見出し1行 + ヘッダ1行 + 項目7行 + 空行1行
        let next = write_side(worksheet, &formats, 2, &CURRENT_LAYOUT, &figures, "NTD").unwrap();
        assert_eq!(next, 12);
        let next = write_side(worksheet, &formats, next, &EVALUATION_LAYOUT, &figures, "NTD").unwrap();
        assert_eq!(next, 22);
        assert!(CURRENT_LAYOUT.show_margin);
        assert!(!EVALUATION_LAYOUT.show_margin);
    }
}
