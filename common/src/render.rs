//! レポートのHTML出力（中英併記）

use crate::report::{cost_item_label, labels, ReportData, SideFigures};
use std::fmt::Write;

/// 値がないときの表示
pub const MISSING: &str = "-";

const TOOL_NAME: &str = "成本分析轉換工具";

const STYLE: &str = r#"
    body { font-family: Arial, Helvetica, sans-serif; margin: 20px; line-height: 1.6; color: #333; }
    h1 { text-align: center; color: #000; border-bottom: 2px solid #333; padding-bottom: 10px; }
    .container { display: flex; gap: 30px; margin: 20px 0; }
    .section { flex: 1; padding: 15px; border: 1px solid #ddd; background: #fafafa; }
    .section h2, .process-section h2 { font-size: 1.1em; color: #333; margin: 0 0 15px 0; }
    table { width: 100%; border-collapse: collapse; background: white; }
    th, td { border: 1px solid #ccc; padding: 8px; text-align: center; }
    th { background-color: #e0e0e0; font-weight: bold; }
    .highlight { background-color: #e3f2fd; font-weight: bold; }
    .process-section { margin-top: 30px; padding: 15px; border: 1px solid #ddd; background: #fafafa; }
    .footer { text-align: center; color: #999; font-size: 0.9em; margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; }
"#;

/// HTML出力オプション
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// フッターに表示する生成日時
    pub generated_at: Option<String>,
}

/// 数量（整数）
pub fn format_quantity(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.0}", v.round_ties_even()))
        .unwrap_or_else(|| MISSING.to_string())
}

/// 金額（小数2桁）
pub fn format_price(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| MISSING.to_string())
}

/// 百分率（`places` 桁、% 付き）
pub fn format_percent(value: Option<f64>, places: usize) -> String {
    value
        .map(|v| format!("{:.*}%", places, v))
        .unwrap_or_else(|| format!("{}%", MISSING))
}

/// HTMLエスケープ
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn table_row(out: &mut String, class: Option<&str>, cells: &[&str]) {
    match class {
        Some(class) => {
            let _ = write!(out, "<tr class=\"{}\">", class);
        }
        None => out.push_str("<tr>"),
    }
    for cell in cells {
        let _ = write!(out, "<td>{}</td>", escape_html(cell));
    }
    out.push_str("</tr>\n");
}

fn side_table(out: &mut String, figures: &SideFigures, currency: &str, price_item: &str, show_margin: bool) {
    let _ = writeln!(
        out,
        "<table>\n<tr><th>項目 | Item</th><th>數量 | Quantity</th><th>百分比 | Percentage</th><th>成本 ({c}) | Cost ({c})</th></tr>",
        c = escape_html(currency)
    );

    table_row(out, None, &[
        cost_item_label(labels::TOTAL_QTY).as_str(),
        format_quantity(figures.total_qty).as_str(),
        MISSING,
        format_price(figures.input_cost).as_str(),
    ]);
    table_row(out, None, &[
        cost_item_label(labels::GOOD_QTY).as_str(),
        format_quantity(figures.good_qty).as_str(),
        format_percent(figures.good_rate, 2).as_str(),
        MISSING,
    ]);
    table_row(out, None, &[
        cost_item_label(labels::DEFECT_QTY).as_str(),
        format_quantity(figures.defect_qty).as_str(),
        format_percent(figures.defect_rate, 2).as_str(),
        MISSING,
    ]);
    table_row(out, None, &[
        cost_item_label(labels::PROCESSING_COST).as_str(),
        MISSING,
        format_percent(figures.processing_pct, 1).as_str(),
        format_price(figures.processing_cost).as_str(),
    ]);
    table_row(out, None, &[
        cost_item_label(labels::TOTAL_COST).as_str(),
        MISSING,
        MISSING,
        format_price(figures.total_cost).as_str(),
    ]);
    table_row(out, Some("highlight"), &[
        cost_item_label(labels::UNIT_COST).as_str(),
        MISSING,
        MISSING,
        format_price(figures.unit_cost).as_str(),
    ]);

    let price = if show_margin {
        format!("{} ({})", format_price(figures.price), format_percent(figures.margin, 1))
    } else {
        format_price(figures.price)
    };
    table_row(out, None, &[cost_item_label(price_item).as_str(), MISSING, MISSING, price.as_str()]);

    out.push_str("</table>\n");
}

/// レポートをHTML文書に変換する
pub fn render_html(report: &ReportData, options: &HtmlOptions) -> String {
    let currency = report.currency.code();
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    let _ = writeln!(out, "<title>Analysis_{}</title>", escape_html(&report.part_no));
    let _ = writeln!(out, "<style>{}</style>\n</head>\n<body>", STYLE);
    let _ = writeln!(
        out,
        "<h1>成本分析 | Cost Analysis | {}</h1>",
        escape_html(&report.part_no)
    );

    out.push_str("<div class=\"container\">\n<div class=\"section\">\n");
    out.push_str("<h2>現況：成本分析 | Current Situation: Cost Analysis</h2>\n");
    side_table(&mut out, &report.current, currency, labels::CURRENT_PRICE, true);
    out.push_str("</div>\n<div class=\"section\">\n");
    out.push_str("<h2>評估：報價 | Evaluation: Quotation</h2>\n");
    side_table(&mut out, &report.evaluation, currency, labels::SUGGESTED_PRICE_FULL, false);
    out.push_str("</div>\n</div>\n");

    out.push_str("<div class=\"process-section\">\n<h2>工序比較 | Process Comparison</h2>\n<table>\n");
    let _ = writeln!(
        out,
        "<tr><th>工序名稱 | Process Name</th><th>現況 ({c}) | Current Situation ({c})</th><th>評估 ({c}) | Evaluation ({c})</th></tr>",
        c = currency
    );
    for entry in &report.processes {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&entry.name.to_string()),
            format_price(entry.current_cost),
            format_price(entry.evaluation_cost),
        );
    }
    out.push_str("</table>\n</div>\n");

    out.push_str("<div class=\"footer\">\n");
    let _ = write!(out, "Generated by {}", TOOL_NAME);
    if let Some(generated_at) = &options.generated_at {
        let _ = write!(out, " | {}", escape_html(generated_at));
    }
    out.push_str("\n</div>\n</body>\n</html>\n");

    out
}
