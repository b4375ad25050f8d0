//! Civic AI Common Library
//!
//! CLIとHTTPサービスで共有されるキーワード表・分類器・レスポンス型

pub mod types;
pub mod keywords;
pub mod classifier;
pub mod error;

pub use types::{ClassificationResult, ErrorResponse};
pub use keywords::{KeywordRule, KeywordTable, civic_issues};
pub use classifier::{category_of, classify, classify_or};
pub use error::{Error, Result};
