//! 端末向けの表示整形

use crate::store::CacheKey;
use std::fmt::Write;
use wiper_lookup_common::{CanonicalField, Dataset, DatasetSource, ResultSet};

pub const FALLBACK_WARNING: &str = "⚠ 未找到数据文件，当前使用内置示例数据";

/// 検索結果を整形する（`limit` 件まで）
pub fn format_results(results: &ResultSet, raw_term: &str, limit: usize) -> String {
    let mut out = String::new();

    if results.term.is_none() {
        out.push_str("请输入车系名称\n");
        return out;
    }

    if results.is_empty() {
        let _ = writeln!(out, "未找到『{}』相关记录", raw_term.trim());
        return out;
    }

    let _ = writeln!(out, "找到 {} 条记录", results.count);
    if let Some(brand) = &results.stripped_brand {
        let _ = writeln!(out, "（已忽略品牌「{}」，按车系匹配）", brand);
    }
    out.push('\n');

    for record in results.records.iter().take(limit) {
        let _ = writeln!(out, "{}", record.title());
        if let Some(trim) = record.trim.as_deref() {
            let _ = writeln!(out, "  配置: {}", trim);
        }
        let summary = record.spec_summary();
        if !summary.is_empty() {
            let _ = writeln!(out, "  {}", summary);
        }
        if let Some(note) = record.note.as_deref() {
            let _ = writeln!(out, "  备注: {}", note);
        }
        out.push_str("---\n");
    }

    if results.count > limit {
        let _ = writeln!(out, "（仅显示前 {} 条）", limit);
    }
    out
}

/// データセットの概要
pub fn format_dataset_info(dataset: &Dataset, key: Option<&CacheKey>) -> String {
    let mut out = String::new();

    match dataset.source() {
        DatasetSource::File { path, sheet } => {
            let _ = writeln!(out, "数据来源: {} [{}]", path.display(), sheet);
        }
        DatasetSource::Sample => {
            let _ = writeln!(out, "{}", FALLBACK_WARNING);
        }
        DatasetSource::Manual => {
            let _ = writeln!(out, "数据来源: 手动替换");
        }
    }
    if let Some(key) = key {
        let _ = writeln!(out, "SHA-256: {}", key.digest);
    }
    let _ = writeln!(out, "记录数: {}", dataset.len());

    let schema = dataset.schema();
    out.push_str("字段映射:\n");
    for (field, column) in schema.fields() {
        let inferred = if field == CanonicalField::ModelName && schema.is_model_inferred() {
            " (推断)"
        } else {
            ""
        };
        let _ = writeln!(out, "  {:<22} ← {}{}", field.key(), column.header, inferred);
    }
    let missing: Vec<&str> = schema.missing().iter().map(|f| f.key()).collect();
    if !missing.is_empty() {
        let _ = writeln!(out, "缺少字段: {}", missing.join(", "));
    }
    out
}
