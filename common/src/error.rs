//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Keyword error: キーワードが重複しています: {0}")]
    DuplicateKeyword(String),

    #[error("Keyword error: 不正なキーワード {0:?}（空文字または大文字を含む）")]
    InvalidKeyword(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
