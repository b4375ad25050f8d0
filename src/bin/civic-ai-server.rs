use anyhow::Context;
use clap::Parser;
use civic_ai_rust::cli::ServerCli;
use civic_ai_rust::config::Config;
use civic_ai_rust::logging::{self, LogTarget};
use civic_ai_rust::pipeline::Pipeline;
use civic_ai_rust::server::{self, AppState};
use civic_ai_rust::captioner;
use tracing::info;
use tracing::level_filters::LevelFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = ServerCli::parse();
    logging::init_tracing(LevelFilter::INFO, LogTarget::Stdout);

    let mut config = Config::load().context("設定の読み込みに失敗")?;
    if let Some(addr) = cli.addr {
        config.bind_addr = addr;
    }
    if let Some(provider) = cli.ai_provider {
        config.provider = provider;
    }

    let addr = config.socket_addr()?;

    // プロバイダとキーワード表は起動時に一度だけ用意し、全リクエストで共有
    let provider = captioner::build_provider(&config).context("キャプションプロバイダの初期化に失敗")?;
    info!(provider = provider.name(), model = %config.model, "キャプションプロバイダ準備完了");

    let state = AppState {
        pipeline: Pipeline::new(provider, &config),
    };
    let app = server::router(state, config.max_upload_bytes);

    server::serve(addr, app).await?;
    Ok(())
}
