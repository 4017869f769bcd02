//! データセットローダー
//!
//! 候補（パスまたはglob）を先頭から試し、最初に見つかったファイルを読み込む。
//! どれも見つからなければ組み込みサンプルを返す。

pub mod pattern;
pub mod workbook;

use crate::error::Result;
use std::path::{Path, PathBuf};
use wiper_lookup_common::{Dataset, DatasetSource};

/// 候補から最初に存在するファイルを探す
pub fn resolve_source(candidates: &[String]) -> Option<PathBuf> {
    for candidate in candidates {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            continue;
        }

        let found = if pattern::is_pattern(candidate) {
            pattern::expand(candidate).into_iter().next()
        } else {
            let path = PathBuf::from(candidate);
            path.is_file().then_some(path)
        };

        if let Some(path) = found {
            tracing::debug!("resolved data source {} -> {}", candidate, path.display());
            return Some(path);
        }
    }
    None
}

/// 候補からデータセットを読み込む
///
/// - ファイルなし → サンプル（`is_fallback_sample() == true`）
/// - 読めない → `WiperError::Load`
/// - 车系列なし → `WiperError::Schema`
pub fn load(candidates: &[String], sheet: Option<&str>) -> Result<Dataset> {
    match resolve_source(candidates) {
        Some(path) => load_file(&path, sheet),
        None => fallback_sample(candidates),
    }
}

/// 組み込みサンプル（データファイルが見つからない場合）
pub fn fallback_sample(candidates: &[String]) -> Result<Dataset> {
    tracing::warn!(
        "no data file found among [{}], using built-in sample",
        candidates.join(", ")
    );
    Ok(Dataset::sample()?)
}

/// 指定ファイルを読み込む
pub fn load_file(path: &Path, sheet: Option<&str>) -> Result<Dataset> {
    let (table, sheet_name) = workbook::read_table(path, sheet)?;
    let dataset = Dataset::new(
        table,
        DatasetSource::File {
            path: path.to_path_buf(),
            sheet: sheet_name,
        },
    )?;

    tracing::info!(
        "loaded {} rows from {} (model column: {})",
        dataset.len(),
        path.display(),
        dataset.schema().model_column().header
    );
    Ok(dataset)
}
