//! HTMLレポート出力

use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cost_report_common::{render_html, HtmlOptions, ReportData};
use std::path::Path;

/// 生成日時付きでHTML文書を作る
pub fn html_document(report: &ReportData) -> String {
    let options = HtmlOptions {
        generated_at: Some(chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()),
    };
    render_html(report, &options)
}

pub fn write_html(report: &ReportData, output_path: &Path) -> Result<()> {
    std::fs::write(output_path, html_document(report))?;
    Ok(())
}

/// HTML文書を埋め込んだ data URL
pub fn data_url(html: &str) -> String {
    format!("data:text/html;base64,{}", STANDARD.encode(html.as_bytes()))
}

/// ダウンロード用リンク（`<a download>`）
pub fn download_link(html: &str, file_name: &str) -> String {
    format!(
        "<a href=\"{}\" download=\"{}\">📥 下載報告 | Download Report</a>",
        data_url(html),
        cost_report_common::render::escape_html(file_name)
    )
}
