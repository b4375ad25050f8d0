//! 市民課題キーワード表
//!
//! キャプション中の部分文字列 → 課題カテゴリの対応表。
//! 表の並び順がそのまま照合順（先勝ち）になるため、順序の変更は分類結果を変える。

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashSet;

/// 組み込みキーワード表（照合順）
pub const CIVIC_ISSUES: &[(&str, &str)] = &[
    // 廃棄物
    ("garbage", "Garbage"),
    ("trash", "Garbage"),
    ("dump", "Garbage"),
    ("waste", "Garbage"),
    ("sewage", "Sewage Overflow"),
    // 道路・交通
    ("pothole", "Pothole"),
    ("road", "Pothole"),
    ("crack", "Pothole"),
    ("damaged_road", "Pothole"),
    ("speedbreaker", "Improper Speedbreaker"),
    ("signal", "Traffic Signal Issue"),
    ("traffic_light", "Traffic Signal Issue"),
    // 照明
    ("streetlight", "Broken Streetlight"),
    ("lamp", "Broken Streetlight"),
    ("pole", "Broken Streetlight"),
    ("dark", "Broken Streetlight"),
    // 水回り
    ("water", "Waterlogging"),
    ("flood", "Waterlogging"),
    ("drain", "Drainage Blockage"),
    ("clog", "Drainage Blockage"),
    ("leak", "Water Pipe Leakage"),
    ("plastic", "Plastic Pollution in Water"),
    ("river", "Plastic Pollution in Water"),
    ("lake", "Plastic Pollution in Water"),
    ("bottle", "Plastic Pollution in Water"),
    // インフラ
    ("building", "Illegal Construction"),
    ("encroachment", "Illegal Construction"),
    ("collapse", "Building Collapse"),
    ("bridge", "Damaged Bridge"),
    ("footpath", "Damaged Footpath"),
    ("sidewalk", "Damaged Footpath"),
    // 治安
    ("accident", "Accident Spot"),
    ("fire", "Fire Hazard"),
    ("theft", "Public Safety Concern"),
    // 環境
    ("tree", "Fallen Tree"),
    ("branch", "Fallen Tree"),
    ("pollution", "Air Pollution"),
    ("smoke", "Air Pollution"),
    ("noise", "Noise Pollution"),
];

lazy_static! {
    static ref CIVIC_ISSUE_TABLE: KeywordTable = KeywordTable {
        rules: CIVIC_ISSUES
            .iter()
            .map(|&(keyword, category)| KeywordRule::new(keyword, category))
            .collect(),
    };
}

/// 組み込みキーワード表を取得（初回アクセス時に一度だけ構築）
pub fn civic_issues() -> &'static KeywordTable {
    &CIVIC_ISSUE_TABLE
}

/// キーワード → カテゴリの1ルール
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordRule {
    /// 小文字の部分文字列
    pub keyword: String,
    /// 表示用のカテゴリ名
    pub category: String,
}

impl KeywordRule {
    pub fn new(keyword: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            category: category.into(),
        }
    }
}

/// 順序付きキーワード表（構築後は不変）
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    rules: Vec<KeywordRule>,
}

impl KeywordTable {
    /// ルール列から表を構築
    ///
    /// キーワードは空でない小文字で、表内で一意であること。
    pub fn new(rules: Vec<KeywordRule>) -> Result<Self> {
        let mut seen = HashSet::new();

        for rule in &rules {
            if rule.keyword.is_empty() || rule.keyword != rule.keyword.to_lowercase() {
                return Err(Error::InvalidKeyword(rule.keyword.clone()));
            }
            if !seen.insert(rule.keyword.as_str()) {
                return Err(Error::DuplicateKeyword(rule.keyword.clone()));
            }
        }

        Ok(Self { rules })
    }

    /// (キーワード, カテゴリ) の組から表を構築
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(keyword, category)| KeywordRule::new(keyword, category))
                .collect(),
        )
    }

    /// 照合順にルールを走査
    pub fn iter(&self) -> impl Iterator<Item = &KeywordRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// カテゴリ一覧（初出順・重複なし）
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rules
            .iter()
            .map(|r| r.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}
