//! ワークブック読み込み
//!
//! xlsx/xlsm/xls/ods は calamine、csv は csv クレートで読み、
//! シート上の絶対座標を保ったまま `Grid` にする。

use crate::error::{CostReportError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use cost_report_common::{Cell, Grid};
use std::path::Path;
use tracing::debug;

/// 対応拡張子（小文字）
pub const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods", "csv"];

/// 拡張子が対応形式か判定（大文字小文字を区別しない）
pub fn is_supported_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// ワークシートを読み込み、先頭 `header_rows` 行を除いたグリッドを返す
///
/// `sheet` を省略した場合は先頭シート。csv では `sheet` は無視する。
pub fn load_grid(path: &Path, sheet: Option<&str>, header_rows: usize) -> Result<Grid> {
    if !path.is_file() {
        return Err(CostReportError::FileNotFound(path.display().to_string()));
    }

    let ext = extension_of(path);
    if !is_supported_extension(&ext) {
        return Err(CostReportError::UnsupportedFormat(path.display().to_string()));
    }

    let grid = if ext == "csv" {
        read_csv(path)?
    } else {
        read_workbook(path, sheet)?
    };

    debug!(
        path = %path.display(),
        rows = grid.height(),
        cols = grid.width(),
        header_rows,
        "ワークシート読み込み"
    );

    Ok(grid.without_leading_rows(header_rows))
}

fn read_workbook(path: &Path, sheet: Option<&str>) -> Result<Grid> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| CostReportError::WorkbookOpen(format!("{}: {}", path.display(), e)))?;

    let range = match sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .map_err(|e| CostReportError::EmptyWorkbook(format!("{} ({})", name, e)))?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| CostReportError::EmptyWorkbook(path.display().to_string()))?
            .map_err(|e| CostReportError::WorkbookOpen(e.to_string()))?,
    };

    Ok(range_to_grid(&range))
}

/// calamine の Range をグリッドへ変換
///
/// Range は使用領域だけを持つため、開始位置の分だけ空行・空列を補う。
pub fn range_to_grid(range: &Range<Data>) -> Grid {
    let (start_row, start_col) = range
        .start()
        .map(|(r, c)| (r as usize, c as usize))
        .unwrap_or((0, 0));

    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
    for source in range.rows() {
        let mut row = vec![Cell::Empty; start_col];
        row.extend(source.iter().map(data_to_cell));
        rows.push(row);
    }

    Grid::new(rows)
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) => Cell::text(s.clone()),
        Data::Bool(b) => Cell::text(if *b { "TRUE" } else { "FALSE" }),
        other => Cell::text(other.to_string()),
    }
}

fn read_csv(path: &Path) -> Result<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(csv_field_to_cell).collect());
    }

    Ok(Grid::new(rows))
}

/// CSVの1フィールドをセルへ（素の数値は Number）
pub fn csv_field_to_cell(field: &str) -> Cell {
    match field.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Cell::Number(n),
        _ => Cell::text(field),
    }
}
