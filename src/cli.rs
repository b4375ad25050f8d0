use crate::ai_provider::AiProvider;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "civic-ai")]
#[command(about = "写真から市民課題のカテゴリを判定して表示", long_about = None)]
pub struct Cli {
    /// 画像ファイル（フォルダ指定時は直下の画像をすべて判定）
    #[arg(required = true)]
    pub path: PathBuf,

    /// 詳細ログを出力（標準エラー）
    #[arg(short, long)]
    pub verbose: bool,

    /// AIプロバイダ（省略時は設定ファイルの値）
    #[arg(long)]
    pub ai_provider: Option<AiProvider>,
}

#[derive(Parser, Debug)]
#[command(name = "civic-ai-server")]
#[command(about = "市民課題判定HTTPサービス (POST /classify)", long_about = None)]
pub struct ServerCli {
    /// 待ち受けアドレス（省略時は設定ファイルの値）
    #[arg(long)]
    pub addr: Option<String>,

    /// AIプロバイダ（省略時は設定ファイルの値）
    #[arg(long)]
    pub ai_provider: Option<AiProvider>,
}
