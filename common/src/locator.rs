//! ラベル検索
//!
//! セル文字列にラベルを部分一致で含む位置を探す。

use crate::grid::Grid;

/// ラベル検索の列上限（現況ブロック13列 + 評価ブロック13列）
pub const LABEL_SCAN_WIDTH: usize = 26;

/// ラベルの一致位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMatch {
    pub row: usize,
    pub col: usize,
}

/// 指定行でラベルを含む列番号を左から順に返す
pub fn find_label_columns(grid: &Grid, row: usize, label: &str, max_cols: usize) -> Vec<usize> {
    let bound = max_cols.min(grid.width());
    (0..bound)
        .filter(|&col| {
            grid.text(row, col)
                .map(|text| text.contains(label))
                .unwrap_or(false)
        })
        .collect()
}

/// グリッド全体でラベルの一致位置を行優先で返す
pub fn find_label(grid: &Grid, label: &str, max_cols: usize) -> Vec<LabelMatch> {
    (0..grid.height())
        .flat_map(|row| {
            find_label_columns(grid, row, label, max_cols)
                .into_iter()
                .map(move |col| LabelMatch { row, col })
        })
        .collect()
}
