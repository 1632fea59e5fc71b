use clap::Parser;
use cost_report::{cli, config, error, export, loader, pipeline, prompt, scanner, settings};
use cli::{Cli, Commands};
use config::Config;
use cost_report_common::{sheet_part_no, Currency};
use error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use settings::ReportSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("cost_report=debug,cost_report_common=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Report { file, part_no, currency, rate, sheet, format, output, no_translate, print_link } => {
            println!("📊 cost-report - 成本分析レポート\n");

            // 1. 読み込み
            println!("[1/3] ワークシートを読み込み中...");
            let grid = loader::load_grid(&file, sheet.as_deref(), config.header_rows)?;
            println!("✔ {}行 × {}列\n", grid.height(), grid.width());

            let part_no = match part_no {
                Some(part_no) => part_no,
                None => prompt::prompt_part_no(sheet_part_no(&grid).as_deref())?,
            };
            let currency = match currency {
                Some(currency) => currency,
                None => prompt::select_currency()?,
            };
            let rate = rate.unwrap_or_else(|| config.rate_for(currency));
            let settings = ReportSettings { part_no, currency: Some(currency), rate }.validate()?;

            // 2. 抽出
            println!("[2/3] 抽出中...{}", if no_translate { " (自動翻訳なし)" } else { "" });
            let mut normalizer = pipeline::build_normalizer(&config, !no_translate)?;
            let report = pipeline::analyze_grid(&grid, &settings, &mut normalizer);
            println!(
                "✔ 品番 {} / {} (匯率 {}) / 工程 {}件\n",
                report.part_no,
                report.currency,
                report.rate,
                report.processes.len()
            );

            // 3. 出力
            println!("[3/3] 出力中... ({})", format);
            let output_dir = output.unwrap_or_else(|| {
                file.parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| PathBuf::from("."))
            });
            for path in export::export_report(&report, format, &output_dir)? {
                println!("✔ 出力: {}", path.display());
            }

            if print_link {
                let html = export::html::html_document(&report);
                let file_name = format!("{}.html", export::report_stem(&report.part_no));
                println!("\n{}", export::html::download_link(&html, &file_name));
            }

            println!("\n✅ 完了");
        }

        Commands::Batch { folder, currency, rate, format, output, no_translate } => {
            println!("📦 cost-report - 一括変換\n");

            println!("[1/2] ワークブックをスキャン中...");
            let workbooks = scanner::scan_folder(&folder)?;
            println!("✔ {}件のワークブックを検出\n", workbooks.len());

            let rate = rate.unwrap_or_else(|| config.rate_for(currency));
            let output_dir = output.unwrap_or_else(|| folder.clone());
            let mut normalizer = pipeline::build_normalizer(&config, !no_translate)?;

            println!("[2/2] 変換中... ({} / 匯率 {})", currency, rate);
            let pb = ProgressBar::new(workbooks.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("##-"),
            );

            let mut succeeded = 0usize;
            let mut failures = Vec::new();
            for workbook in &workbooks {
                pb.set_message(workbook.file_name.clone());
                let result = convert_one(&workbook.path, &workbook.stem, currency, rate, &config, format, &output_dir, &mut normalizer);
                match result {
                    Ok(paths) => {
                        succeeded += 1;
                        for path in paths {
                            pb.println(format!("✔ {} → {}", workbook.file_name, path.display()));
                        }
                    }
                    Err(e) => {
                        pb.println(format!("✖ {}: {}", workbook.file_name, e));
                        failures.push((workbook.file_name.clone(), e.to_string()));
                    }
                }
                pb.inc(1);
            }
            pb.finish_and_clear();

            println!(
                "\n✅ 完了: 成功 {}件 / 失敗 {}件 (翻訳キャッシュ {}件)",
                succeeded,
                failures.len(),
                normalizer.translator().cache().len()
            );
            for (name, message) in &failures {
                println!("  ✖ {}: {}", name, message);
            }
        }

        Commands::Config { show, set_endpoint, set_timeout, set_rate, set_header_rows } => {
            let mut config = config;
            let mut changed = false;

            if let Some(endpoint) = set_endpoint {
                config.translate_endpoint = endpoint;
                changed = true;
                println!("✔ 翻訳APIのURLを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                changed = true;
                println!("✔ タイムアウトを{}秒に設定しました", seconds);
            }

            if let Some(assignment) = set_rate {
                let (currency, rate) = config::parse_rate_assignment(&assignment)
                    .map_err(error::CostReportError::Config)?;
                config.set_rate(currency, rate)?;
                changed = true;
                println!("✔ {} の既定レートを{}に設定しました", currency, rate);
            }

            if let Some(rows) = set_header_rows {
                config.header_rows = rows;
                changed = true;
                println!("✔ 見出し行数を{}に設定しました", rows);
            }

            if changed {
                config.save()?;
            }

            if show || !changed {
                println!("設定: {}", Config::config_path()?.display());
                println!("  翻訳API: {}", config.translate_endpoint);
                println!("  タイムアウト: {}秒", config.translate_timeout_seconds);
                println!("  自動翻訳: {}", if config.auto_translate { "有効" } else { "無効" });
                println!("  見出し行数: {}", config.header_rows);
                println!("  既定レート:");
                for currency in Currency::ALL {
                    println!("    {}: {}", currency.display_name(), config.rate_for(currency));
                }
            }
        }
    }

    Ok(())
}

/// 一括変換の1ファイル分（品番はファイル名）
#[allow(clippy::too_many_arguments)]
fn convert_one(
    path: &std::path::Path,
    part_no: &str,
    currency: Currency,
    rate: f64,
    config: &Config,
    format: cli::ExportFormat,
    output_dir: &std::path::Path,
    normalizer: &mut cost_report_common::ProcessNameNormalizer<pipeline::DynTranslator>,
) -> Result<Vec<PathBuf>> {
    let settings = ReportSettings {
        part_no: part_no.to_string(),
        currency: Some(currency),
        rate,
    }
    .validate()?;
    let report = pipeline::analyze_file(path, None, config.header_rows, &settings, normalizer)?;
    export::export_report(&report, format, output_dir)
}
