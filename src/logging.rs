use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// ログの出力先
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    /// CLIでは標準出力をカテゴリ表示に使うため標準エラーへ
    Stderr,
}

/// tracing subscriber を初期化
///
/// `RUST_LOG` があればそちらを優先する。`CIVIC_AI_LOG_FORMAT=json` でJSON出力。
pub fn init_tracing(default_level: LevelFilter, target: LogTarget) {
    let use_json = std::env::var("CIVIC_AI_LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let writer = match target {
        LogTarget::Stdout => fmt::writer::BoxMakeWriter::new(std::io::stdout),
        LogTarget::Stderr => fmt::writer::BoxMakeWriter::new(std::io::stderr),
    };

    // 二重初期化（テスト等）は無視
    let _ = if use_json {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_writer(writer),
            )
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(writer))
            .with(filter)
            .try_init()
    };
}
