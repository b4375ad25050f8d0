use anyhow::Context;
use clap::Parser;
use civic_ai_rust::{captioner, cli, config, logging, pipeline, scanner};
use cli::Cli;
use config::Config;
use logging::LogTarget;
use pipeline::Pipeline;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    logging::init_tracing(level, LogTarget::Stderr);

    let mut config = Config::load().context("設定の読み込みに失敗")?;
    if let Some(provider) = cli.ai_provider {
        config.provider = provider;
    }

    let provider = captioner::build_provider(&config)?;
    let pipeline = Pipeline::new(provider, &config);
    let fallback = config.fallback_category.as_str();

    if cli.path.is_dir() {
        // フォルダ: 1画像1行で出力し、失敗があれば終了コード1
        let images = scanner::scan_folder(&cli.path)?;
        tracing::debug!("{}枚の写真を検出", images.len());

        let mut failed = 0usize;
        for image in &images {
            match pipeline.classify_path(&image.path).await {
                Ok(outcome) => println!("{}: {}", image.file_name, outcome.category_or(fallback)),
                Err(e) => {
                    failed += 1;
                    println!("{}: error: {}", image.file_name, e);
                }
            }
        }

        return Ok(if failed > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS });
    }

    let outcome = pipeline
        .classify_path(&cli.path)
        .await
        .with_context(|| format!("{} の判定に失敗", cli.path.display()))?;

    println!("{}", outcome.category_or(fallback));
    Ok(ExitCode::SUCCESS)
}
