//! ワークシートのグリッドモデル
//!
//! 読み込み済みシートを行×列の不変グリッドとして保持する。
//! セルの意味は列名ではなく位置とラベル文字列から決まる。

use serde::{Deserialize, Serialize};

/// セル値
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// 文字列セルを生成（空文字は Empty 扱い）
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// 文字列セルならその中身
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// 表示用テキスト（Empty は None）
    ///
    /// 整数値の数値セルは小数部なしで表現する（1000.0 → "1000"）。
    pub fn display_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) => Some(format_number(*n)),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// 数値として解釈できるか判定し、値を返す
///
/// - 数値セルは有限値のみ受理
/// - 文字列は前後空白除去、桁区切り（`,` と全角 `，`）を除去
/// - 空文字・プレースホルダ（`-` / `—`）は拒否
pub fn parse_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) if n.is_finite() => Some(*n),
        Cell::Number(_) | Cell::Empty => None,
        Cell::Text(s) => parse_number_str(s),
    }
}

/// 文字列版の数値判定
pub fn parse_number_str(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace([',', '，'], "");
    if cleaned.is_empty() || cleaned == "-" || cleaned == "—" {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// 行×列の読み取り専用グリッド
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Grid {
    /// 行データからグリッドを構築（全行を最大列数までパディング）
    pub fn new(mut rows: Vec<Vec<Cell>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, Cell::Empty);
        }
        Self { rows, width }
    }

    /// 文字列の二次元配列から構築（テスト・CSV用）
    ///
    /// 空文字は Empty になる。数値変換は行わない。
    pub fn from_strings<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(Cell::text).collect())
                .collect(),
        )
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// セル参照（範囲外は None）
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// セルのテキスト表現（範囲外・空は None）
    pub fn text(&self, row: usize, col: usize) -> Option<String> {
        self.cell(row, col).and_then(Cell::display_text)
    }

    /// セルの数値（範囲外・非数値は None）
    pub fn number(&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row, col).and_then(parse_number)
    }

    /// 行のスライス
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    /// 先頭から指定行数を取り除いたグリッドを返す
    pub fn without_leading_rows(mut self, count: usize) -> Self {
        let count = count.min(self.rows.len());
        self.rows.drain(..count);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_rejects_placeholders() {
        assert_eq!(parse_number_str("-"), None);
        assert_eq!(parse_number_str("—"), None);
        assert_eq!(parse_number_str(""), None);
        assert_eq!(parse_number_str("   "), None);
        assert_eq!(parse_number_str("abc"), None);
    }

    #[test]
    fn test_parse_number_thousands_separators() {
        assert_eq!(parse_number_str("1,234.50"), Some(1234.50));
        assert_eq!(parse_number_str("1，234"), Some(1234.0));
        assert_eq!(parse_number_str(" 42 "), Some(42.0));
        assert_eq!(parse_number_str("-3.5"), Some(-3.5));
    }

    #[test]
    fn test_parse_number_cells() {
        assert_eq!(parse_number(&Cell::Number(12.5)), Some(12.5));
        assert_eq!(parse_number(&Cell::Number(f64::NAN)), None);
        assert_eq!(parse_number(&Cell::Number(f64::INFINITY)), None);
        assert_eq!(parse_number(&Cell::Empty), None);
        assert_eq!(parse_number(&Cell::text("NaN")), None);
    }

    #[test]
    fn test_grid_pads_rows() {
        let grid = Grid::from_strings(vec![vec!["a"], vec!["b", "c", "d"]]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.cell(0, 2), Some(&Cell::Empty));
        assert_eq!(grid.text(0, 2), None);
        assert_eq!(grid.text(1, 2).as_deref(), Some("d"));
    }

    #[test]
    fn test_grid_out_of_bounds() {
        let grid = Grid::from_strings(vec![vec!["a"]]);
        assert_eq!(grid.cell(5, 0), None);
        assert_eq!(grid.text(0, 9), None);
    }

    #[test]
    fn test_number_display_text() {
        assert_eq!(Cell::Number(1000.0).display_text().as_deref(), Some("1000"));
        assert_eq!(Cell::Number(12.25).display_text().as_deref(), Some("12.25"));
    }

    #[test]
    fn test_without_leading_rows() {
        let grid = Grid::from_strings(vec![vec!["header"], vec!["body"]]);
        let trimmed = grid.without_leading_rows(1);
        assert_eq!(trimmed.height(), 1);
        assert_eq!(trimmed.text(0, 0).as_deref(), Some("body"));
        assert!(trimmed.without_leading_rows(5).is_empty());
    }
}
