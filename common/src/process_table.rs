//! 工程一覧の抽出
//!
//! 「製程」「工序」見出し行の直下から工程名と現況/評価コストを読み取る。
//! 行ごとの結果は [`RowOutcome`] で表し、不正な行はスキップする。

use crate::grid::{Cell, Grid};
use crate::process_name::{ProcessName, ProcessNameNormalizer};
use crate::report::round_to;
use crate::translate::Translator;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 見出しトークン
pub const HEADER_TOKENS: &[&str] = &["製程", "工序"];

/// 見出し判定に使う先頭列数
pub const HEADER_SCAN_COLUMNS: usize = 5;

/// 見出しが見つからないときの開始行
pub const FALLBACK_START_ROW: usize = 16;

/// 工程名の候補列
pub const NAME_COLUMNS: &[usize] = &[1, 2, 14, 15];

/// 現況コストの候補列
pub const CURRENT_COST_COLUMNS: &[usize] = &[7, 8, 9];

/// 評価コストの候補列
pub const EVALUATION_COST_COLUMNS: &[usize] = &[20, 21, 22];

/// 名前なし行が続いたときの打ち切り幅（開始行からの行数）
pub const MAX_SCAN_WITHOUT_NAME: usize = 20;

/// 抽出した工程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessEntry {
    /// ワークシート上の工程名
    pub raw_name: String,
    pub name: ProcessName,
    pub current_cost: Option<f64>,
    pub evaluation_cost: Option<f64>,
}

/// 正規化前の工程行
#[derive(Debug, Clone, PartialEq)]
pub struct RawProcessRow {
    pub row: usize,
    pub name: String,
    pub current_cost: Option<f64>,
    pub evaluation_cost: Option<f64>,
}

/// 1行の抽出結果
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// 工程として採用
    Entry(RawProcessRow),
    /// 工程名なし
    NoName,
    /// 名前はあるがコストが両方とも取れない
    NoCost { name: String },
    /// 数値らしいが解釈できないセルを含む
    Malformed { name: String, col: usize, value: String },
}

/// 工程一覧の開始行を探す
pub fn find_start_row(grid: &Grid) -> usize {
    (0..grid.height())
        .find(|&row| {
            let joined = (0..HEADER_SCAN_COLUMNS)
                .map(|col| grid.text(row, col).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(" ");
            HEADER_TOKENS.iter().any(|token| joined.contains(token))
        })
        .map(|row| row + 1)
        .unwrap_or(FALLBACK_START_ROW)
}

/// 工程名を候補列から取得
fn row_name(grid: &Grid, row: usize) -> Option<String> {
    NAME_COLUMNS.iter().find_map(|&col| {
        let text = grid.cell(row, col)?.as_text()?.trim();
        if text.is_empty() || HEADER_TOKENS.contains(&text) {
            None
        } else {
            Some(text.to_string())
        }
    })
}

/// 工程コスト用の簡易数値判定
///
/// `.` `-` `e` `E` を取り除いた残りが数字のみなら数値候補とみなす。
/// 桁区切りは受け付けない。
pub fn looks_like_plain_number(text: &str) -> bool {
    let digits: String = text
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | 'e' | 'E'))
        .collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// 候補列から最初のコストを取得
///
/// 値は `rate` で割って小数2桁に丸める。
/// 判定を通ったのに解釈できない値（例: `1-2`）は `Err((列, 値))`。
fn scan_cost(
    grid: &Grid,
    row: usize,
    columns: &[usize],
    rate: f64,
) -> Result<Option<f64>, (usize, String)> {
    for &col in columns {
        let Some(cell) = grid.cell(row, col) else {
            continue;
        };
        let text = match cell {
            Cell::Empty => continue,
            Cell::Number(n) if !n.is_finite() => continue,
            other => other.display_text().unwrap_or_default(),
        };
        if !looks_like_plain_number(&text) {
            continue;
        }
        return match text.parse::<f64>() {
            Ok(value) => Ok(Some(round_to(value / rate, 2))),
            Err(_) => Err((col, text)),
        };
    }
    Ok(None)
}

/// 1行を解析する
pub fn extract_row(grid: &Grid, row: usize, rate: f64) -> RowOutcome {
    let Some(name) = row_name(grid, row) else {
        return RowOutcome::NoName;
    };

    // 現況側の解釈失敗は行ごとスキップ、評価側は値なし扱い
    let current_cost = match scan_cost(grid, row, CURRENT_COST_COLUMNS, rate) {
        Ok(cost) => cost,
        Err((col, value)) => return RowOutcome::Malformed { name, col, value },
    };
    let evaluation_cost = scan_cost(grid, row, EVALUATION_COST_COLUMNS, rate)
        .unwrap_or_else(|(col, value)| {
            debug!(%name, col, %value, "評価コストを解釈できないため値なし");
            None
        });

    match (current_cost, evaluation_cost) {
        (None, None) => RowOutcome::NoCost { name },
        (current_cost, evaluation_cost) => RowOutcome::Entry(RawProcessRow {
            row,
            name,
            current_cost,
            evaluation_cost,
        }),
    }
}

/// 開始行から各行の結果を列挙する（名前なしが続けば打ち切り）
pub fn scan_rows(grid: &Grid, start_row: usize, rate: f64) -> Vec<RowOutcome> {
    let mut outcomes = Vec::new();

    for row in start_row..grid.height() {
        let outcome = extract_row(grid, row, rate);
        if outcome == RowOutcome::NoName && row > start_row + MAX_SCAN_WITHOUT_NAME {
            break;
        }
        outcomes.push(outcome);
    }

    outcomes
}

/// 工程一覧を抽出し、工程名を正規化する
pub fn scan_process_table<T: Translator>(
    grid: &Grid,
    rate: f64,
    normalizer: &mut ProcessNameNormalizer<T>,
) -> Vec<ProcessEntry> {
    let start_row = find_start_row(grid);
    debug!(start_row, "scanning process table");

    scan_rows(grid, start_row, rate)
        .into_iter()
        .filter_map(|outcome| match outcome {
            RowOutcome::Entry(raw) => Some(ProcessEntry {
                name: normalizer.normalize(&raw.name),
                raw_name: raw.name,
                current_cost: raw.current_cost,
                evaluation_cost: raw.evaluation_cost,
            }),
            RowOutcome::Malformed { name, col, value } => {
                debug!(%name, col, %value, "skipping malformed process row");
                None
            }
            RowOutcome::NoName | RowOutcome::NoCost { .. } => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::NoopTranslator;

    fn blank_row() -> Vec<String> {
        vec![String::new(); 23]
    }

    fn process_row(name: &str, current: &str, evaluation: &str) -> Vec<String> {
        let mut row = blank_row();
        row[1] = name.to_string();
        row[7] = current.to_string();
        row[20] = evaluation.to_string();
        row
    }

    #[test]
    fn test_looks_like_plain_number() {
        assert!(looks_like_plain_number("12"));
        assert!(looks_like_plain_number("12.5"));
        assert!(looks_like_plain_number("-3"));
        assert!(looks_like_plain_number("1e5"));
        assert!(!looks_like_plain_number("1,200"));
        assert!(!looks_like_plain_number(""));
        assert!(!looks_like_plain_number("-"));
        assert!(!looks_like_plain_number("abc"));
    }

    #[test]
    fn test_find_start_row() {
        let mut rows = vec![blank_row(); 8];
        rows[5][0] = "製程".to_string();
        let grid = Grid::from_strings(rows);
        assert_eq!(find_start_row(&grid), 6);

        let grid = Grid::from_strings(vec![blank_row(); 3]);
        assert_eq!(find_start_row(&grid), FALLBACK_START_ROW);
    }

    #[test]
    fn test_header_in_sixth_column_is_ignored() {
        let mut rows = vec![blank_row(); 3];
        rows[1][5] = "工序".to_string();
        let grid = Grid::from_strings(rows);
        assert_eq!(find_start_row(&grid), FALLBACK_START_ROW);
    }

    #[test]
    fn test_scan_terminates_after_empty_run() {
        let mut rows = vec![blank_row(); 6];
        rows[5][1] = "製程".to_string();
        rows.push(process_row("電鍍", "12.5", "10"));
        rows.extend(vec![blank_row(); 26]);
        // 打ち切り後の工程は拾わない
        rows.push(process_row("研磨", "3", "2"));
        let grid = Grid::from_strings(rows);

        let mut normalizer = ProcessNameNormalizer::new(NoopTranslator);
        let entries = scan_process_table(&grid, 1.0, &mut normalizer);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name.to_string(), "電鍍 | Plating");
        assert_eq!(entries[0].current_cost, Some(12.5));
        assert_eq!(entries[0].evaluation_cost, Some(10.0));
    }

    #[test]
    fn test_threshold_measured_from_start_row() {
        // 開始行6、名前なし行は 6+20=26 行目まで許容、27 行目で打ち切り
        let mut rows = vec![blank_row(); 6];
        rows[5][0] = "工序".to_string();
        rows.extend(vec![blank_row(); 20]);
        rows.push(process_row("包裝", "1", ""));
        rows.push(blank_row());
        rows.push(process_row("刻字", "2", ""));
        let grid = Grid::from_strings(rows);

        let outcomes = scan_rows(&grid, find_start_row(&grid), 1.0);
        let names: Vec<_> = outcomes
            .iter()
            .filter_map(|o| match o {
                RowOutcome::Entry(raw) => Some(raw.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["包裝"]);
    }

    #[test]
    fn test_rows_without_cost_are_skipped() {
        let mut rows = vec![blank_row(); 2];
        rows[0][2] = "製程".to_string();
        rows[1][1] = "包裝".to_string();
        let grid = Grid::from_strings(rows);
        assert_eq!(
            extract_row(&grid, 1, 1.0),
            RowOutcome::NoCost { name: "包裝".to_string() }
        );
    }

    #[test]
    fn test_malformed_row_is_skipped_not_fatal() {
        let mut rows = vec![blank_row()];
        rows[0][0] = "製程".to_string();
        rows.push(process_row("電鍍", "1-2", "5"));
        rows.push(process_row("研磨", "4", "3"));
        let grid = Grid::from_strings(rows);

        assert!(matches!(extract_row(&grid, 1, 1.0), RowOutcome::Malformed { col: 7, .. }));

        let mut normalizer = ProcessNameNormalizer::new(NoopTranslator);
        let entries = scan_process_table(&grid, 2.0, &mut normalizer);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].raw_name, "研磨");
        assert_eq!(entries[0].current_cost, Some(2.0));
        assert_eq!(entries[0].evaluation_cost, Some(1.5));
    }

    #[test]
    fn test_unparsable_evaluation_cost_keeps_row() {
        let mut rows = vec![blank_row()];
        rows[0][0] = "製程".to_string();
        rows.push(process_row("電鍍", "5", "1-2"));
        let grid = Grid::from_strings(rows);

        match extract_row(&grid, 1, 1.0) {
            RowOutcome::Entry(raw) => {
                assert_eq!(raw.current_cost, Some(5.0));
                assert_eq!(raw.evaluation_cost, None);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let mut normalizer = ProcessNameNormalizer::new(NoopTranslator);
        let entries = scan_process_table(&grid, 1.0, &mut normalizer);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name.to_string(), "電鍍 | Plating");
    }

    #[test]
    fn test_costs_rounded_to_cents() {
        let mut rows = vec![blank_row()];
        rows[0][0] = "製程".to_string();
        rows.push(process_row("研磨", "4", "10"));
        let grid = Grid::from_strings(rows);

        let mut normalizer = ProcessNameNormalizer::new(NoopTranslator);
        let entries = scan_process_table(&grid, 32.5, &mut normalizer);
        assert_eq!(entries[0].current_cost, Some(0.12));
        assert_eq!(entries[0].evaluation_cost, Some(0.31));
    }

    #[test]
    fn test_name_columns_and_header_tokens() {
        let mut row = blank_row();
        row[1] = "製程".to_string();
        row[14] = "陽極".to_string();
        row[21] = "8".to_string();
        let grid = Grid::from_strings(vec![blank_row(), row]);
        match extract_row(&grid, 1, 1.0) {
            RowOutcome::Entry(raw) => {
                assert_eq!(raw.name, "陽極");
                assert_eq!(raw.current_cost, None);
                assert_eq!(raw.evaluation_cost, Some(8.0));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_number_cells_are_costs() {
        let mut cells = vec![Cell::Empty; 23];
        cells[2] = Cell::text("噴砂");
        cells[8] = Cell::Number(6.5);
        cells[22] = Cell::Number(f64::NAN);
        let grid = Grid::new(vec![cells]);
        match extract_row(&grid, 0, 1.0) {
            RowOutcome::Entry(raw) => {
                assert_eq!(raw.current_cost, Some(6.5));
                assert_eq!(raw.evaluation_cost, None);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
