//! データファイル候補のパターン展開
//!
//! `data/*.xlsx` や `wiper_{v1,v2}.xlsx` のような glob 形式を展開する。
//! パスの要素ごとに globset で照合し、結果は辞書順。

use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// ワイルドカードを含むか
pub fn is_pattern(candidate: &str) -> bool {
    candidate
        .chars()
        .any(|c| matches!(c, '*' | '?' | '[' | '{'))
}

/// パターンに一致する既存ファイルを辞書順で返す
pub fn expand(pattern: &str) -> Vec<PathBuf> {
    let mut root = PathBuf::new();
    let mut rest: Vec<String> = Vec::new();

    for component in Path::new(pattern).components() {
        let text = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !is_pattern(&text) {
            root.push(component);
        } else {
            rest.push(text.into_owned());
        }
    }

    if rest.is_empty() {
        return if root.is_file() { vec![root] } else { Vec::new() };
    }

    let matchers = match rest
        .iter()
        .map(|p| component_matcher(p))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!("invalid source pattern {}: {}", pattern, e);
            return Vec::new();
        }
    };

    let root = if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    };
    let depth = matchers.len();

    let mut matches: Vec<PathBuf> = WalkDir::new(&root)
        .max_depth(depth)
        .into_iter()
        .filter_entry(|entry| {
            let d = entry.depth();
            d == 0 || matchers[d - 1].is_match(entry.file_name())
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.depth() == depth && e.path().is_file())
        .map(|e| e.into_path())
        .collect();

    matches.sort();
    matches
}

/// パス要素1つ分のパターン（区切り文字はまたがない）
fn component_matcher(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    Ok(GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()?
        .compile_matcher())
}
