//! cost-report
//!
//! 原価分析ワークシートを読み込み、中英併記のレポートを出力するCLIの本体。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod pipeline;
pub mod prompt;
pub mod scanner;
pub mod settings;
pub mod translate;
