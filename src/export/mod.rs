pub mod html;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use cost_report_common::ReportData;
use std::path::{Path, PathBuf};

/// 品番からファイル名の本体を作る（パス区切りなどは `_` に置換）
pub fn report_stem(part_no: &str) -> String {
    let safe: String = part_no
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("Analysis_{}", safe)
}

/// 出力先が既存ディレクトリか拡張子なしなら `Analysis_{品番}.{ext}` を付ける
pub fn output_path_for_format(output: &Path, part_no: &str, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", report_stem(part_no), extension))
    } else {
        output.to_path_buf()
    }
}

/// 複数形式を出すときの出力パス（ファイル指定時は同じ stem で拡張子だけ変える）
pub fn output_paths_for_all(output: &Path, part_no: &str, extensions: &[&str]) -> Vec<PathBuf> {
    if output.is_dir() || output.extension().is_none() {
        extensions
            .iter()
            .map(|ext| output.join(format!("{}.{}", report_stem(part_no), ext)))
            .collect()
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let fallback = report_stem(part_no);
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&fallback);
        extensions
            .iter()
            .map(|ext| parent.join(format!("{}.{}", stem, ext)))
            .collect()
    }
}

fn write_json(report: &ReportData, output_path: &Path) -> Result<()> {
    let json = report.to_json()?;
    std::fs::write(output_path, json)?;
    Ok(())
}

fn write_one(report: &ReportData, extension: &str, output_path: &Path) -> Result<()> {
    match extension {
        "html" => html::write_html(report, output_path),
        "xlsx" => excel::write_excel(report, output_path),
        _ => write_json(report, output_path),
    }
}

/// レポートを指定形式で書き出し、出力したパスを返す
pub fn export_report(report: &ReportData, format: ExportFormat, output: &Path) -> Result<Vec<PathBuf>> {
    let extensions = format.extensions();
    let paths = if format == ExportFormat::All {
        output_paths_for_all(output, &report.part_no, extensions)
    } else {
        vec![output_path_for_format(output, &report.part_no, extensions[0])]
    };

    if output.extension().is_none() {
        std::fs::create_dir_all(output)?;
    } else if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    for (extension, path) in extensions.iter().zip(&paths) {
        write_one(report, extension, path)?;
        tracing::debug!(path = %path.display(), "レポート出力");
    }

    Ok(paths)
}
