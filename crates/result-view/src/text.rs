use regex::Regex;
use std::sync::LazyLock;
use zhconv::{Variant, zhconv};

static PAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[第\s*\d+\s*頁\]|【第\s*\d+\s*頁】").expect("page marker pattern is valid")
});

/// Simplified to traditional characters, leaving vocabulary alone. Markup and ASCII pass through.
pub fn to_traditional(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    zhconv(text, Variant::ZhHant)
}

/// Removes `[第 N 頁]` and `【第 N 頁】` markers left over from PDF extraction
pub fn strip_page_markers(text: &str) -> String {
    PAGE_MARKER.replace_all(text, "").into_owned()
}

/// Full display pipeline: conversion, page marker removal, trim
pub fn display_text(text: &str) -> String {
    strip_page_markers(&to_traditional(text)).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("[第 3 頁]馬達異音", "馬達異音")]
    #[case("開頭【第12頁】結尾", "開頭結尾")]
    #[case("[第1頁] 段落 [第 2 頁]", "段落")]
    #[case("[第 X 頁]", "[第 X 頁]")]
    #[case("  plain  ", "plain")]
    fn test_page_markers_removed(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(display_text(input), expected);
    }

    #[test]
    fn test_simplified_is_converted() {
        assert_eq!(to_traditional("这个问题"), "這個問題");
    }

    #[rstest]
    #[case("軟件")]
    #[case("數據庫")]
    #[case("打印機")]
    fn test_traditional_vocabulary_is_kept(#[case] text: &str) {
        assert_eq!(display_text(text), text);
    }

    #[test]
    fn test_markup_survives_conversion() {
        assert_eq!(to_traditional("<em>马达</em>"), "<em>馬達</em>");
    }
}
