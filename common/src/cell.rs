//! セル値
//!
//! スプレッドシートの1セルを表す。NaN・`-`・空文字は「値なし」として扱う。

use std::fmt;

/// 表示時に「値なし」とみなすプレースホルダ（pandas の既定NA表記 + `-`）
const PLACEHOLDERS: &[&str] = &[
    "-", "nan", "NaN", "NAN", "-nan", "-NaN", "None", "null", "NULL", "NA", "N/A", "n/a",
    "#N/A", "#N/A N/A", "#NA", "<NA>", "-1.#IND", "-1.#QNAN", "1.#IND", "1.#QNAN",
];

/// セル値
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Int(i64),
    Bool(bool),
}

impl Cell {
    /// 文字列セルを作成
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// 値なし判定（空・NaN・プレースホルダ）
    pub fn is_absent(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(n) => n.is_nan(),
            Cell::Text(s) => {
                let s = s.trim();
                s.is_empty() || PLACEHOLDERS.contains(&s)
            }
            Cell::Int(_) | Cell::Bool(_) => false,
        }
    }

    /// 文字列型のセルか
    pub fn is_text(&self) -> bool {
        matches!(self, Cell::Text(_))
    }

    /// 表示用の文字列（値なしの場合は None）
    ///
    /// 整数値の浮動小数は小数点なしで出す（Excelの `24` は `24.0` で読まれるため）。
    pub fn display_value(&self) -> Option<String> {
        if self.is_absent() {
            return None;
        }
        let value = match self {
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => format_number(*n),
            Cell::Int(i) => i.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Empty => return None,
        };
        Some(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_value() {
            Some(v) => write!(f, "{}", v),
            None => Ok(()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_values() {
        assert!(Cell::Empty.is_absent());
        assert!(Cell::Number(f64::NAN).is_absent());
        assert!(Cell::text("").is_absent());
        assert!(Cell::text("  ").is_absent());
        assert!(Cell::text("-").is_absent());
        assert!(Cell::text("nan").is_absent());
        for token in ["N/A", "n/a", "NA", "NULL", "#N/A", "<NA>", " N/A "] {
            assert!(Cell::text(token).is_absent(), "{:?}", token);
        }
        assert!(!Cell::text("NAV").is_absent());
        assert!(!Cell::text("14").is_absent());
        assert!(!Cell::Number(0.0).is_absent());
        assert!(!Cell::Int(0).is_absent());
    }

    #[test]
    fn test_display_value_number() {
        assert_eq!(Cell::Number(24.0).display_value(), Some("24".to_string()));
        assert_eq!(Cell::Number(2019.0).display_value(), Some("2019".to_string()));
        assert_eq!(Cell::Number(15.5).display_value(), Some("15.5".to_string()));
        assert_eq!(Cell::Int(16).display_value(), Some("16".to_string()));
    }

    #[test]
    fn test_display_value_text_trimmed() {
        assert_eq!(Cell::text(" U型钩 ").display_value(), Some("U型钩".to_string()));
        assert_eq!(Cell::text("-").display_value(), None);
        assert_eq!(Cell::Number(f64::NAN).display_value(), None);
    }

    #[test]
    fn test_display_absent_is_empty() {
        assert_eq!(format!("{}", Cell::Empty), "");
        assert_eq!(format!("{}", Cell::Number(26.0)), "26");
    }
}
