//! 工程名の正規化
//!
//! ワークシートの工程名（例: 「風切防鏽3」「廠外電鍍」）を
//! 表示名と英語名の組に変換する。
//!
//! ## 処理順
//! 1. 空白（半角・全角）を除去
//! 2. 委託区分などのノイズ語を除去
//! 3. 末尾の連番を除去
//! 4. 「校車」を含む名前は Calibration 扱い（名前は保持）
//! 5. 辞書照合、なければ自動翻訳
//! 6. 洗浄系の工程は「碳氫去油處理」に統一

use crate::grid::Cell;
use crate::translate::{AutoTranslator, Translator};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 名前が取れないときのプレースホルダ
pub const PLACEHOLDER: &str = "-";

/// 除去するノイズ語（廠內・廠外・委外など）
pub const NOISE_WORDS: &[&str] = &["廠內", "廠外", "託外", "外包", "委外"];

/// 校正工程の判定語
pub const CALIBRATION_TOKEN: &str = "校車";
pub const CALIBRATION_LABEL: &str = "Calibration";

/// 洗浄工程の統一名
pub const CLEANING_DISPLAY: &str = "碳氫去油處理";
pub const CLEANING_LABEL: &str = "Remove oil by hydrocarbon";

/// 洗浄工程として統一する同義語
pub const CLEANING_SYNONYMS: &[&str] = &["手工清洗", "清洗", "去油", "自動清洗"];

lazy_static! {
    /// 工程名の中英対照表
    static ref PROCESS_TRANSLATIONS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("校車", "Calibration");
        m.insert("車床", "Lathe");
        m.insert("手工清洗", CLEANING_LABEL);
        m.insert("清洗", CLEANING_LABEL);
        m.insert("去油", CLEANING_LABEL);
        m.insert("自動清洗", CLEANING_LABEL);
        m.insert(CLEANING_DISPLAY, CLEANING_LABEL);
        m.insert("修內徑加工", "Inner Diameter Processing");
        m.insert("包裝", "Packing");
        m.insert("熱處理", "Heat Treatment");
        m.insert("風切防鏽", "Anti-Rust");
        m.insert("清點數量", "Counting");
        m.insert("高週波", "High Frequency");
        m.insert("染黑", "Black Oxide");
        m.insert("巡牙", "Thread Inspection");
        m.insert("研磨", "Grinding");
        m.insert("拋光", "Polishing");
        m.insert("陽極", "Anodizing");
        m.insert("電鍍", "Plating");
        m.insert("噴砂", "Sandblasting");
        m.insert("刻字", "Laser Marking");
        m.insert("CNC加工", "CNC Machining");
        m.insert("CNC車床", "CNC Lathe");
        m.insert("CNC銑床", "CNC Milling");
        m.insert("CNC放電", "CNC EDM");
        m.insert("CNC線切割", "CNC Wire Cutting");
        m.insert("CNC磨床", "CNC Grinding");
        m.insert("CNC火花機", "CNC Spark Machine");
        m
    };

    static ref TRAILING_DIGITS_RE: Regex = Regex::new(r"\d+$").unwrap();
}

/// 辞書から英語名を引く
pub fn dictionary_label(name: &str) -> Option<&'static str> {
    PROCESS_TRANSLATIONS.get(name).copied()
}

/// 正規化済み工程名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessName {
    /// 表示名（中国語）
    pub display: String,
    /// 英語名
    pub english: String,
}

impl ProcessName {
    pub fn new(display: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            english: english.into(),
        }
    }

    pub fn is_cleaning(&self) -> bool {
        self.display == CLEANING_DISPLAY && self.english == CLEANING_LABEL
    }
}

impl std::fmt::Display for ProcessName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} | {}", self.display, self.english)
    }
}

/// 工程名の文字列クリーニング（辞書照合の前段）
///
/// 前後の空白を落とし、半角・全角スペースを除去 → ノイズ語除去 → 末尾連番除去。
/// タブや改行は名前の途中なら残す。出力に再適用しても変化しない。
pub fn clean_name(raw: &str) -> String {
    // 除去で新たなノイズ語や末尾連番が現れることがあるため、変化がなくなるまで繰り返す
    let mut name = raw.to_string();
    loop {
        let cleaned = clean_once(&name);
        if cleaned == name {
            return cleaned;
        }
        name = cleaned;
    }
}

fn clean_once(name: &str) -> String {
    let spaced: String = name
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{3000}'))
        .collect();
    let stripped = NOISE_WORDS
        .iter()
        .fold(spaced, |acc, word| acc.replace(word, ""));
    TRAILING_DIGITS_RE.replace(stripped.trim(), "").trim().to_string()
}

/// 工程名ノーマライザ（翻訳キャッシュを保持）
#[derive(Debug)]
pub struct ProcessNameNormalizer<T> {
    translator: AutoTranslator<T>,
}

impl<T: Translator> ProcessNameNormalizer<T> {
    pub fn new(backend: T) -> Self {
        Self {
            translator: AutoTranslator::new(backend),
        }
    }

    pub fn with_translator(translator: AutoTranslator<T>) -> Self {
        Self { translator }
    }

    pub fn translator(&self) -> &AutoTranslator<T> {
        &self.translator
    }

    /// 工程名を正規化する
    pub fn normalize(&mut self, raw: &str) -> ProcessName {
        let cleaned = clean_name(raw);

        let english = if cleaned.contains(CALIBRATION_TOKEN) {
            // 「校車A」などの接尾辞は保持する
            CALIBRATION_LABEL.to_string()
        } else if let Some(label) = dictionary_label(&cleaned) {
            label.to_string()
        } else {
            self.translator.translate(&cleaned)
        };

        if english == CLEANING_LABEL || CLEANING_SYNONYMS.contains(&cleaned.as_str()) {
            return ProcessName::new(CLEANING_DISPLAY, CLEANING_LABEL);
        }

        ProcessName::new(cleaned, english)
    }

    /// セル値から「表示名 | 英語名」を生成（文字列以外は "-"）
    pub fn normalize_cell(&mut self, cell: &Cell) -> String {
        match cell.as_text() {
            Some(text) => self.normalize(text).to_string(),
            None => PLACEHOLDER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::NoopTranslator;
    use std::cell::RefCell;

    struct RecordingTranslator {
        seen: RefCell<Vec<String>>,
    }

    impl Translator for RecordingTranslator {
        fn translate(&self, text: &str) -> Result<String, String> {
            self.seen.borrow_mut().push(text.to_string());
            Ok(format!("EN:{}", text))
        }
    }

    fn normalizer() -> ProcessNameNormalizer<NoopTranslator> {
        ProcessNameNormalizer::new(NoopTranslator)
    }

    #[test]
    fn test_dictionary_lookup() {
        let mut n = normalizer();
        assert_eq!(n.normalize("電鍍").to_string(), "電鍍 | Plating");
        assert_eq!(n.normalize("CNC線切割").to_string(), "CNC線切割 | CNC Wire Cutting");
    }

    #[test]
    fn test_noise_and_suffix_removed() {
        let mut n = normalizer();
        assert_eq!(n.normalize("廠外電鍍").english, "Plating");
        assert_eq!(n.normalize("風切防鏽3").to_string(), "風切防鏽 | Anti-Rust");
        assert_eq!(n.normalize("熱處理(委外)12").display, "熱處理()");
    }

    #[test]
    fn test_trailing_digits_only() {
        assert_eq!(clean_name("3CNC"), "3CNC");
        assert_eq!(clean_name("研磨2研磨34"), "研磨2研磨");
        assert_eq!(clean_name("CNC加工 1"), "CNC加工");
    }

    #[test]
    fn test_whitespace_removed() {
        let mut n = normalizer();
        assert_eq!(n.normalize("  熱　處 理 ").to_string(), "熱處理 | Heat Treatment");
    }

    #[test]
    fn test_only_spaces_removed() {
        assert_eq!(clean_name("熱\t處理"), "熱\t處理");
        assert_eq!(clean_name("\t研磨\n"), "研磨");
        assert_eq!(clean_name("研磨3\t廠內"), "研磨");
    }

    #[test]
    fn test_calibration_keeps_suffix() {
        let mut n = normalizer();
        let name = n.normalize("校車A");
        assert_eq!(name.display, "校車A");
        assert_eq!(name.english, "Calibration");
    }

    #[test]
    fn test_cleaning_synonyms_unified() {
        let mut n = normalizer();
        let expected = ProcessName::new(CLEANING_DISPLAY, CLEANING_LABEL);
        for raw in ["手工清洗", "清洗", "去油", "自動清洗", "廠內清洗2"] {
            assert_eq!(n.normalize(raw), expected, "{}", raw);
        }
    }

    #[test]
    fn test_translation_label_triggers_cleaning() {
        struct CleaningTranslator;
        impl Translator for CleaningTranslator {
            fn translate(&self, _text: &str) -> Result<String, String> {
                Ok(CLEANING_LABEL.to_string())
            }
        }
        let mut n = ProcessNameNormalizer::new(CleaningTranslator);
        assert!(n.normalize("超音波洗淨").is_cleaning());
    }

    #[test]
    fn test_fallback_translation_cached() {
        let backend = RecordingTranslator { seen: RefCell::new(Vec::new()) };
        let mut n = ProcessNameNormalizer::new(&backend);
        assert_eq!(n.normalize("去毛邊").english, "EN:去毛邊");
        assert_eq!(n.normalize("去毛邊 2").english, "EN:去毛邊");
        assert_eq!(backend.seen.borrow().as_slice(), ["去毛邊".to_string()]);
    }

    #[test]
    fn test_idempotent() {
        let backend = RecordingTranslator { seen: RefCell::new(Vec::new()) };
        let mut n = ProcessNameNormalizer::new(&backend);
        for raw in ["清洗", "校車B", "委外 陽極 3", "去毛邊", "CNC加工1 ", "廠廠內外研磨"] {
            let first = n.normalize(raw);
            let second = n.normalize(&first.display);
            assert_eq!(first, second, "{}", raw);
        }
    }

    #[test]
    fn test_empty_after_cleaning() {
        let mut n = normalizer();
        let name = n.normalize("外包 12");
        assert_eq!(name.display, "");
        assert_eq!(name.english, "");
        assert_eq!(name.to_string(), " | ");
    }

    #[test]
    fn test_normalize_cell_non_text() {
        let mut n = normalizer();
        assert_eq!(n.normalize_cell(&Cell::Number(3.0)), "-");
        assert_eq!(n.normalize_cell(&Cell::Empty), "-");
        assert_eq!(n.normalize_cell(&Cell::text("包裝")), "包裝 | Packing");
    }
}
