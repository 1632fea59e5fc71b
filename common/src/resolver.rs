//! ラベル駆動の数値抽出
//!
//! ワークシートは左右2ブロック構成:
//! - 現況（Current）: 0〜12列
//! - 評価（Evaluation）: 13〜25列
//!
//! ラベルの右隣 1〜4 セルから最初の数値を拾う。
//! 見つからなければ None（表示は "-"）。

use crate::grid::Grid;
use crate::locator::{find_label_columns, LABEL_SCAN_WIDTH};
use serde::{Deserialize, Serialize};

/// 評価ブロックの開始列
pub const EVALUATION_BLOCK_START: usize = 13;

/// ラベルから右方向に探す最大オフセット
pub const VALUE_SEARCH_OFFSET: usize = 4;

/// 抽出対象のブロック
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Current,
    Evaluation,
}

impl Side {
    /// 優先ブロックに属する列か
    pub fn prefers(&self, col: usize) -> bool {
        match self {
            Side::Current => col < EVALUATION_BLOCK_START,
            Side::Evaluation => (EVALUATION_BLOCK_START..LABEL_SCAN_WIDTH).contains(&col),
        }
    }

    /// 同一行のラベル一致列から探索対象を選ぶ
    ///
    /// 優先ブロックに一致がなければ、現況は先頭、評価は末尾の一致にフォールバックする。
    pub fn select_columns(&self, matches: &[usize]) -> Vec<usize> {
        let preferred: Vec<usize> = matches.iter().copied().filter(|&c| self.prefers(c)).collect();
        if !preferred.is_empty() {
            return preferred;
        }
        let fallback = match self {
            Side::Current => matches.first(),
            Side::Evaluation => matches.last(),
        };
        fallback.copied().into_iter().collect()
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Current => write!(f, "current"),
            Side::Evaluation => write!(f, "evaluation"),
        }
    }
}

/// ラベルに対応する数値を取得し、`rate` で割って返す
///
/// 上の行から順に探索し、最初に数値が得られた行・オフセットを採用する。
pub fn resolve_value(grid: &Grid, label: &str, side: Side, rate: f64) -> Option<f64> {
    (0..grid.height()).find_map(|row| resolve_in_row(grid, row, label, side, rate))
}

fn resolve_in_row(grid: &Grid, row: usize, label: &str, side: Side, rate: f64) -> Option<f64> {
    let matches = find_label_columns(grid, row, label, LABEL_SCAN_WIDTH);
    if matches.is_empty() {
        return None;
    }

    side.select_columns(&matches).into_iter().find_map(|col| {
        (1..=VALUE_SEARCH_OFFSET)
            .map(|offset| col + offset)
            .take_while(|&c| c < grid.width())
            .find_map(|c| grid.number(row, c))
            .map(|value| value / rate)
    })
}
