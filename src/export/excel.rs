//! Excel生成
//!
//! データセットの表をそのままワークシートに書き出す（管理画面の保存用）。
//! ローダーで読み戻せる形式（1行目ヘッダー、数値は数値セル）にする。

use crate::error::{Result, WiperError};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use std::path::Path;
use wiper_lookup_common::{Cell, Table};

/// シート名の最大長（Excelの制限）
const MAX_SHEET_NAME: usize = 31;

/// 表をExcelに書き出す
pub fn write_table(table: &Table, output_path: &Path, sheet_name: &str) -> Result<()> {
    let buffer = generate_excel_buffer(table, sheet_name)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}

/// Excelをバッファに生成
pub fn generate_excel_buffer(table: &Table, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sanitize_sheet_name(sheet_name))
        .map_err(|e| WiperError::ExcelWrite(format!("シート名設定エラー: {}", e)))?;

    for (col, header) in table.headers().iter().enumerate() {
        let col = column_index(col)?;
        worksheet
            .write_string_with_format(0, col, header, &header_format)
            .map_err(|e| WiperError::ExcelWrite(format!("ヘッダー書き込みエラー: {}", e)))?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let excel_row = u32::try_from(row_idx + 1)
            .map_err(|_| WiperError::ExcelWrite(format!("行数が多すぎます: {}", row_idx + 1)))?;

        for (col, cell) in row.iter().enumerate() {
            let col = column_index(col)?;
            let written = match cell {
                Cell::Empty => continue,
                Cell::Text(s) => worksheet.write_string(excel_row, col, s),
                Cell::Number(n) if n.is_nan() => continue,
                Cell::Number(n) => worksheet.write_number(excel_row, col, *n),
                Cell::Int(i) => worksheet.write_number(excel_row, col, *i as f64),
                Cell::Bool(b) => worksheet.write_boolean(excel_row, col, *b),
            };
            written.map_err(|e| WiperError::ExcelWrite(format!("セル書き込みエラー: {}", e)))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| WiperError::ExcelWrite(format!("Excel保存エラー: {}", e)))
}

fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| WiperError::ExcelWrite(format!("列数が多すぎます: {}", col + 1)))
}

/// Excelで使えない文字を置き換え、長さを制限する
fn sanitize_sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\') { '_' } else { c })
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim_matches('\'').trim();
    if cleaned.is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned.to_string()
    }
}
