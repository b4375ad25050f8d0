//! キャプション → 課題カテゴリの分類
//!
//! 表の順に走査し、キャプション（小文字化）に部分文字列として含まれる
//! 最初のキーワードのカテゴリを返す。単語境界は考慮しない。

use crate::keywords::{KeywordRule, KeywordTable};

/// 最初に一致したルールを返す（一致なしは `None`）
pub fn classify<'a>(table: &'a KeywordTable, caption: &str) -> Option<&'a KeywordRule> {
    if caption.is_empty() {
        return None;
    }

    let caption = caption.to_lowercase();
    table.iter().find(|rule| caption.contains(rule.keyword.as_str()))
}

/// 一致したカテゴリ名
pub fn category_of<'a>(table: &'a KeywordTable, caption: &str) -> Option<&'a str> {
    classify(table, caption).map(|rule| rule.category.as_str())
}

/// 一致しなければ `default` を返す（CLI用）
pub fn classify_or<'a>(table: &'a KeywordTable, caption: &str, default: &'a str) -> &'a str {
    category_of(table, caption).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::civic_issues;

    #[test]
    fn test_single_keyword() {
        let table = civic_issues();
        assert_eq!(category_of(table, "a large pothole in the middle"), Some("Pothole"));
        assert_eq!(category_of(table, "smoke rising from a chimney"), Some("Air Pollution"));
        assert_eq!(category_of(table, "a collapsed wall"), Some("Building Collapse"));
    }

    #[test]
    fn test_no_match() {
        let table = civic_issues();
        assert_eq!(classify(table, "a cat sitting on a sofa"), None);
        assert_eq!(classify_or(table, "a cat sitting on a sofa", "Others"), "Others");
    }

    #[test]
    fn test_empty_caption() {
        let table = civic_issues();
        assert_eq!(classify(table, ""), None);
        assert_eq!(classify_or(table, "", "Others"), "Others");
    }

    #[test]
    fn test_case_insensitive() {
        let table = civic_issues();
        assert_eq!(category_of(table, "GARBAGE near the STREET"), Some("Garbage"));
        assert_eq!(category_of(table, "A Fallen TREE"), Some("Fallen Tree"));
    }

    #[test]
    fn test_substring_not_word_bounded() {
        let table = civic_issues();
        assert_eq!(category_of(table, "the pole vaulter"), Some("Broken Streetlight"));
        // "street" には "tree" が含まれる
        assert_eq!(category_of(table, "a busy street"), Some("Fallen Tree"));
    }

    #[test]
    fn test_first_match_wins_by_table_order() {
        let table = civic_issues();
        let rule = classify(table, "a pile of garbage on a flooded road").unwrap();
        assert_eq!(rule.keyword, "garbage");
        assert_eq!(rule.category, "Garbage");

        // キャプション内の位置ではなく表の順で決まる
        let rule = classify(table, "a flooded road with some garbage").unwrap();
        assert_eq!(rule.keyword, "garbage");
    }

    #[test]
    fn test_water_and_leak_resolve_to_earlier_rule() {
        let table = civic_issues();
        assert_eq!(category_of(table, "a leak spraying water"), Some("Waterlogging"));
    }

    #[test]
    fn test_order_dependence_with_custom_table() {
        let leak_first =
            KeywordTable::from_pairs(&[("leak", "Water Pipe Leakage"), ("water", "Waterlogging")])
                .unwrap();
        let water_first =
            KeywordTable::from_pairs(&[("water", "Waterlogging"), ("leak", "Water Pipe Leakage")])
                .unwrap();
        let caption = "water leak under the bridge";

        assert_eq!(category_of(&leak_first, caption), Some("Water Pipe Leakage"));
        assert_eq!(category_of(&water_first, caption), Some("Waterlogging"));
    }

    #[test]
    fn test_every_keyword_matches_itself() {
        let table = civic_issues();
        for rule in table.iter() {
            let caption = format!("there is {} here", rule.keyword.to_uppercase());
            let matched = classify(table, &caption).unwrap();
            let own = table.iter().position(|r| r == rule).unwrap();
            let found = table.iter().position(|r| r == matched).unwrap();
            assert!(found <= own, "{} matched later rule {}", rule.keyword, matched.keyword);
        }
    }

    #[test]
    fn test_empty_table() {
        let table = KeywordTable::default();
        assert_eq!(classify(&table, "garbage"), None);
    }
}
