//! 検索語の正規化
//!
//! 前後の空白を除き、ラテン文字だけ小文字化する。漢字などはそのまま。

/// ラテン文字（ASCII・Latin-1補助・拡張A/B・拡張追加）か
fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(c, '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}')
}

/// ラテン文字のみ小文字化
pub fn fold_case(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        if is_latin(c) {
            folded.extend(c.to_lowercase());
        } else {
            folded.push(c);
        }
    }
    folded
}

/// 検索語を正規化する。空白のみなら None
pub fn normalize_term(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(fold_case(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_case_latin() {
        assert_eq!(fold_case("GOLF"), "golf");
        assert_eq!(fold_case("Golf GTI"), "golf gti");
        assert_eq!(fold_case("CITROËN"), "citroën");
    }

    #[test]
    fn test_fold_case_keeps_cjk() {
        assert_eq!(fold_case("高尔夫GTI"), "高尔夫gti");
        // 全角英字はラテン文字として扱わない
        assert_eq!(fold_case("ＧＯＬＦ"), "ＧＯＬＦ");
    }

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  Golf \n"), Some("golf".to_string()));
        assert_eq!(normalize_term("\u{3000}卡罗拉\u{3000}"), Some("卡罗拉".to_string()));
        assert_eq!(normalize_term(""), None);
        assert_eq!(normalize_term("   "), None);
    }
}
