//! スプレッドシート読み込み（calamine）

use crate::error::{Result, WiperError};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use wiper_lookup_common::{Cell, Table};

/// シートを読み込んで表にする
///
/// 1行目をヘッダーとして扱う。全セルが空の行は読み飛ばす。
/// 戻り値は (表, 実際に読んだシート名)。
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<(Table, String)> {
    let path_text = path.display().to_string();

    let mut workbook =
        open_workbook_auto(path).map_err(|e| WiperError::load(path_text.clone(), e))?;

    let names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) if names.iter().any(|n| n == name) => name.to_string(),
        Some(name) => {
            return Err(WiperError::load(
                path_text,
                format!("工作表不存在: {} (现有: {})", name, names.join(", ")),
            ));
        }
        None => names
            .first()
            .cloned()
            .ok_or_else(|| WiperError::load(path_text.clone(), "工作簿中没有工作表"))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| WiperError::load(path_text.clone(), e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().enumerate().map(|(i, c)| header_text(i, c)).collect())
        .unwrap_or_default();

    let body: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(to_cell).collect::<Vec<_>>())
        .filter(|cells| !cells.iter().all(Cell::is_absent))
        .collect();

    tracing::debug!(
        "read sheet {} from {}: {} columns, {} rows",
        sheet_name,
        path_text,
        headers.len(),
        body.len()
    );

    Ok((Table::new(headers, body), sheet_name))
}

fn header_text(index: usize, cell: &Data) -> String {
    let text = cell.to_string();
    let text = text.trim();
    if text.is_empty() {
        format!("column_{}", index + 1)
    } else {
        text.to_string()
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Int(*i),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Text(other.to_string()),
    }
}
