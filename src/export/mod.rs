pub mod excel;

use crate::error::Result;
use std::path::{Path, PathBuf};
use wiper_lookup_common::{Dataset, DatasetSource};

/// 保存時のデフォルトファイル名
pub const DEFAULT_FILE_NAME: &str = "wiper_data.xlsx";
const DEFAULT_SHEET_NAME: &str = "雨刷数据";

fn output_path_for(output: &Path) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(DEFAULT_FILE_NAME)
    } else {
        output.to_path_buf()
    }
}

/// データセットをExcelに保存する。書き出したパスを返す
///
/// 読み込み元のシート名があればそれを使う。
pub fn save_dataset(dataset: &Dataset, output: &Path) -> Result<PathBuf> {
    let output_path = output_path_for(output);
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let sheet_name = match dataset.source() {
        DatasetSource::File { sheet, .. } => sheet.as_str(),
        DatasetSource::Sample | DatasetSource::Manual => DEFAULT_SHEET_NAME,
    };

    excel::write_table(dataset.table(), &output_path, sheet_name)?;
    tracing::info!("saved {} rows to {}", dataset.len(), output_path.display());
    Ok(output_path)
}
