//! キャプション生成モジュール
//!
//! デコード済み画像から短い英文キャプションを得る外部AIの抽象。
//! - blip_api: 事前学習済みBLIPモデルのHTTP推論API
//! - cli_runner: ローカルのAI CLI（claude/codex/gemini）

mod blip_api;
mod cli_runner;

pub use blip_api::{BlipApiCaptioner, parse_caption_response};
pub use cli_runner::CliCaptioner;

use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::{CivicAiError, Result};
use crate::image_input::CaptionImage;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type CaptionFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// 画像 → キャプション
pub trait CaptionProvider: Send + Sync {
    /// ログ表示用の名前
    fn name(&self) -> &str;

    fn caption<'a>(&'a self, image: &'a CaptionImage) -> CaptionFuture<'a>;
}

/// 設定に応じたプロバイダを構築
pub fn build_provider(config: &Config) -> Result<Arc<dyn CaptionProvider>> {
    match config.provider {
        AiProvider::Blip => Ok(Arc::new(BlipApiCaptioner::new(config)?)),
        provider => Ok(Arc::new(CliCaptioner::new(provider, config.timeout())?)),
    }
}

/// AI出力をキャプション1文に整形
///
/// 最初の空でない行を採用し、前後の空白と引用符を取り除く。
pub fn clean_caption(raw: &str) -> Result<String> {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    let caption = line.trim_matches(|c| c == '"' || c == '\'' || c == '`').trim();

    if caption.is_empty() {
        return Err(CivicAiError::ApiParse("caption is empty".into()));
    }

    Ok(caption.to_string())
}
