//! 写真キャプションによる市民課題カテゴリ判定
//!
//! 画像 → キャプション（外部AI）→ キーワード照合 → カテゴリ

pub mod ai_provider;
pub mod captioner;
pub mod cli;
pub mod config;
pub mod error;
pub mod image_input;
pub mod logging;
pub mod pipeline;
pub mod scanner;
pub mod server;
