//! 画像 → キャプション → 課題カテゴリ
//!
//! HTTPサービスとCLIで共通の処理。一致なしの扱い（エラー/既定カテゴリ）は呼び出し側が決める。

use crate::captioner::CaptionProvider;
use crate::config::Config;
use crate::error::{CivicAiError, Result};
use crate::image_input::{CaptionImage, decode_image};
use civic_ai_common::{ClassificationResult, KeywordRule, KeywordTable, civic_issues, classify};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// 1画像分の処理結果
#[derive(Debug, Clone)]
pub struct Outcome {
    pub caption: String,
    /// 一致したルール（一致なしは `None`）
    pub rule: Option<&'static KeywordRule>,
}

impl Outcome {
    pub fn category(&self) -> Option<&str> {
        self.rule.map(|r| r.category.as_str())
    }

    pub fn category_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.category().unwrap_or(default)
    }

    /// 一致なしを `NotCivicIssue` として扱う（HTTP用）
    pub fn into_result(self) -> Result<ClassificationResult> {
        match self.rule {
            Some(rule) => Ok(ClassificationResult {
                caption: self.caption,
                category: rule.category.clone(),
            }),
            None => Err(CivicAiError::NotCivicIssue),
        }
    }
}

#[derive(Clone)]
pub struct Pipeline {
    provider: Arc<dyn CaptionProvider>,
    table: &'static KeywordTable,
    max_image_size: u32,
}

impl Pipeline {
    pub fn new(provider: Arc<dyn CaptionProvider>, config: &Config) -> Self {
        let table = civic_issues();
        info!(
            rules = table.len(),
            categories = ?table.categories(),
            "キーワード表を読み込み"
        );

        Self {
            provider,
            table,
            max_image_size: config.max_image_size,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// キャプションを分類
    pub fn classify_caption(&self, caption: String) -> Outcome {
        let rule = classify(self.table, &caption);
        match rule {
            Some(r) => info!(caption = %caption, keyword = %r.keyword, category = %r.category, "分類完了"),
            None => info!(caption = %caption, "該当カテゴリなし"),
        }
        Outcome { caption, rule }
    }

    /// 画像バイト列からキャプションを生成
    pub async fn caption_bytes(&self, bytes: Vec<u8>) -> Result<String> {
        let image = self.decode(bytes).await?;
        debug!(
            provider = self.provider.name(),
            width = image.width,
            height = image.height,
            "キャプション生成開始"
        );

        let caption = self.provider.caption(&image).await?;
        debug!(caption = %caption, "キャプション生成完了");
        Ok(caption)
    }

    pub async fn classify_bytes(&self, bytes: Vec<u8>) -> Result<Outcome> {
        let caption = self.caption_bytes(bytes).await?;
        Ok(self.classify_caption(caption))
    }

    pub async fn classify_path(&self, path: &Path) -> Result<Outcome> {
        if !path.is_file() {
            return Err(CivicAiError::FileNotFound(path.display().to_string()));
        }

        let bytes = tokio::fs::read(path).await?;
        self.classify_bytes(bytes).await
    }

    async fn decode(&self, bytes: Vec<u8>) -> Result<CaptionImage> {
        let max_image_size = self.max_image_size;
        tokio::task::spawn_blocking(move || decode_image(&bytes, max_image_size))
            .await
            .map_err(|e| CivicAiError::ImageLoad(format!("decode task aborted: {}", e)))?
    }
}
