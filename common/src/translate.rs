//! 自動翻訳フォールバック
//!
//! 辞書にない工程名を外部翻訳サービスで英訳する。
//! 結果は入力テキストをキーにメモ化し、同じ名前での再リクエストを避ける。
//! 失敗は致命的ではなく、原文をそのまま返す（失敗結果もキャッシュする）。

use std::collections::HashMap;
use tracing::debug;

/// 翻訳サービスが失敗時に返すことがあるマーカー
pub const FAILURE_MARKER: &str = "[object Object]";

/// 翻訳バックエンド
pub trait Translator {
    /// `text` を英訳する。エラーは呼び出し側で原文フォールバックに変換される。
    fn translate(&self, text: &str) -> Result<String, String>;
}

/// 翻訳を行わないバックエンド（オフライン用）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

impl Translator for NoopTranslator {
    fn translate(&self, text: &str) -> Result<String, String> {
        Ok(text.to_string())
    }
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, text: &str) -> Result<String, String> {
        (**self).translate(text)
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn translate(&self, text: &str) -> Result<String, String> {
        (**self).translate(text)
    }
}

/// 翻訳キャッシュ（プロセス内、無効化なし）
#[derive(Debug, Clone, Default)]
pub struct TranslationCache {
    entries: HashMap<String, String>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// キャッシュをルックアップ
    pub fn get(&self, text: &str) -> Option<&str> {
        self.entries.get(text).map(String::as_str)
    }

    /// キャッシュに追加
    pub fn insert(&mut self, text: String, translated: String) {
        self.entries.insert(text, translated);
    }

    /// キャッシュ件数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// キャッシュ付き翻訳
#[derive(Debug)]
pub struct AutoTranslator<T> {
    backend: T,
    cache: TranslationCache,
}

impl<T: Translator> AutoTranslator<T> {
    pub fn new(backend: T) -> Self {
        Self {
            backend,
            cache: TranslationCache::new(),
        }
    }

    /// 既存キャッシュを引き継いで生成
    pub fn with_cache(backend: T, cache: TranslationCache) -> Self {
        Self { backend, cache }
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn backend(&self) -> &T {
        &self.backend
    }

    /// 英訳を取得（失敗時は原文）
    pub fn translate(&mut self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        if let Some(cached) = self.cache.get(text) {
            return cached.to_string();
        }

        let resolved = match self.backend.translate(text) {
            Ok(translated) if translated != FAILURE_MARKER && translated != text => translated,
            Ok(_) => text.to_string(),
            Err(e) => {
                debug!(text, error = %e, "auto translation failed; keeping original");
                text.to_string()
            }
        };

        self.cache.insert(text.to_string(), resolved.clone());
        resolved
    }
}
