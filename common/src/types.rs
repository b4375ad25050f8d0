//! 分類結果・エラーレスポンスの型定義
//!
//! HTTPサービスのJSONペイロードとしてそのままシリアライズされる。

use serde::{Deserialize, Serialize};

/// 画像アップロードがない場合のメッセージ
pub const NO_IMAGE_MESSAGE: &str = "No image uploaded";

/// 課題カテゴリに一致しなかった場合のメッセージ
pub const NOT_CIVIC_ISSUE_MESSAGE: &str =
    "This does not look like a civic issue. Please upload a different picture.";

/// CLIで一致なしの場合に使うカテゴリ
pub const DEFAULT_FALLBACK_CATEGORY: &str = "Others";

/// 分類成功時の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub caption: String,
    pub category: String,
}

/// エラー時のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
